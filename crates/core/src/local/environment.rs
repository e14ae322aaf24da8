use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::RwLock;

use crate::traits::LocalEnvironmentPort;

/// 进程环境变量端口
///
/// 直接读写当前进程的环境变量。非法的变量名（空、包含 `=` 或 NUL）和包含 NUL 的值
/// 会返回 `InvalidInput` 错误，而不是让标准库 panic。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

fn validate_name(key: &str) -> io::Result<()> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid environment variable name: {key:?}"),
        ));
    }
    Ok(())
}

fn validate_value(value: &str) -> io::Result<()> {
    if value.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "environment variable value contains NUL",
        ));
    }
    Ok(())
}

impl LocalEnvironmentPort for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        if validate_name(key).is_err() {
            return None;
        }
        std::env::var(key).ok()
    }

    fn set_var(&self, key: &str, value: &str) -> io::Result<()> {
        validate_name(key)?;
        validate_value(value)?;
        std::env::set_var(key, value);
        Ok(())
    }

    fn unset_var(&self, key: &str) -> io::Result<()> {
        validate_name(key)?;
        std::env::remove_var(key);
        Ok(())
    }
}

/// 内存环境变量端口
///
/// 用于测试：每个实例拥有独立的变量表，可以并行使用。
/// 通过 `fail_on` 指定的变量名在写入和删除时返回错误，用于模拟系统调用失败。
#[derive(Debug, Default)]
pub struct InMemoryEnvironment {
    vars: RwLock<HashMap<String, String>>,
    failing: RwLock<HashSet<String>>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars: RwLock::new(vars),
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// 让指定变量的写入和删除失败
    pub fn fail_on<K: Into<String>>(&self, key: K) {
        self.failing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into());
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.vars.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check(&self, key: &str) -> io::Result<()> {
        validate_name(key)?;
        let failing = self.failing.read().unwrap_or_else(|e| e.into_inner());
        if failing.contains(key) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("environment variable {key} is not writable"),
            ));
        }
        Ok(())
    }
}

impl LocalEnvironmentPort for InMemoryEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set_var(&self, key: &str, value: &str) -> io::Result<()> {
        self.check(key)?;
        validate_value(value)?;
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn unset_var(&self, key: &str) -> io::Result<()> {
        self.check(key)?;
        self.vars
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}
