//! 本地环境变量适配器
//!
//! 按变量名原样读写进程环境（不经过键路径转换），并记录本实例读写过的值。

pub mod environment;

pub use environment::{InMemoryEnvironment, SystemEnvironment};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use paramstore_errors::{ConfigStoreError, ConfigStoreResult};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::traits::{ConfigurationStore, LocalEnvironmentPort};

/// 本地环境变量适配器
///
/// `get_environment` 只返回观察缓存中的值，而不是扫描整个进程环境。
pub struct LocalStore {
    port: Arc<dyn LocalEnvironmentPort>,
    values: RwLock<HashMap<String, String>>,
}

impl LocalStore {
    pub fn new(port: Arc<dyn LocalEnvironmentPort>) -> Self {
        Self {
            port,
            values: RwLock::new(HashMap::new()),
        }
    }

    /// 使用进程环境
    pub fn system() -> Self {
        Self::new(Arc::new(SystemEnvironment::new()))
    }

    /// 观察缓存的副本
    pub async fn observed(&self) -> HashMap<String, String> {
        self.values.read().await.clone()
    }

    /// 从观察缓存中移除键，不修改进程环境
    pub async fn forget(&self, key: &str) {
        self.values.write().await.remove(key);
    }

    fn write_var(&self, operation: &'static str, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.port
            .set_var(key, value)
            .map_err(|e| ConfigStoreError::local(operation, key, e.to_string()))
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::system()
    }
}

#[async_trait]
impl ConfigurationStore for LocalStore {
    #[instrument(skip_all, fields(key = %key))]
    async fn create(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        if self.port.get_var(key).is_some_and(|current| !current.is_empty()) {
            return Err(ConfigStoreError::local(
                "create",
                key,
                "environment variable already set",
            ));
        }
        self.write_var("set", key, value)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn set(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.write_var("set", key, value)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn delete(&self, key: &str) -> ConfigStoreResult<()> {
        self.port
            .unset_var(key)
            .map_err(|e| ConfigStoreError::local("delete", key, e.to_string()))?;
        self.values.write().await.remove(key);
        Ok(())
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn get(&self, key: &str) -> ConfigStoreResult<String> {
        match self.port.get_var(key) {
            Some(value) if !value.is_empty() => {
                self.values
                    .write()
                    .await
                    .insert(key.to_string(), value.clone());
                Ok(value)
            }
            _ => {
                debug!("本地环境变量未设置");
                Err(ConfigStoreError::not_found(key))
            }
        }
    }

    async fn get_environment(&self) -> ConfigStoreResult<HashMap<String, String>> {
        Ok(self.observed().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(env: InMemoryEnvironment) -> (Arc<InMemoryEnvironment>, LocalStore) {
        let env = Arc::new(env);
        let store = LocalStore::new(env.clone());
        (env, store)
    }

    #[tokio::test]
    async fn test_get_unset_is_not_found() {
        let (_, store) = store_with(InMemoryEnvironment::new());
        let err = store.get("MISSING").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.key(), Some("MISSING"));
        assert!(store.observed().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_empty_is_not_found() {
        let (_, store) = store_with(InMemoryEnvironment::from_pairs([("EMPTY", "")]));
        assert!(store.get("EMPTY").await.unwrap_err().is_not_found());
        assert!(store.observed().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_caches_value_by_exact_name() {
        let (_, store) = store_with(InMemoryEnvironment::from_pairs([("HELLO_WORLD", "hi")]));
        assert_eq!(store.get("HELLO_WORLD").await.unwrap(), "hi");
        assert!(store.get("hello_world").await.unwrap_err().is_not_found());

        let env = store.get_environment().await.unwrap();
        assert_eq!(env.len(), 1);
        assert_eq!(env["HELLO_WORLD"], "hi");
    }

    #[tokio::test]
    async fn test_set_writes_through() {
        let (env, store) = store_with(InMemoryEnvironment::new());
        store.set("PORT", "8080").await.unwrap();
        assert_eq!(env.get_var("PORT").as_deref(), Some("8080"));
        assert_eq!(store.observed().await["PORT"], "8080");
    }

    #[tokio::test]
    async fn test_set_failure_leaves_cache_untouched() {
        let env = InMemoryEnvironment::new();
        env.fail_on("LOCKED");
        let (_, store) = store_with(env);

        let err = store.set("LOCKED", "x").await.unwrap_err();
        assert!(matches!(
            err,
            ConfigStoreError::LocalOperation { operation: "set", .. }
        ));
        assert!(store.observed().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_existing_variable() {
        let (env, store) = store_with(InMemoryEnvironment::from_pairs([("TAKEN", "1")]));
        let err = store.create("TAKEN", "2").await.unwrap_err();
        assert!(err.is_already_exists());
        assert_eq!(env.get_var("TAKEN").as_deref(), Some("1"));

        store.create("FRESH", "3").await.unwrap();
        assert_eq!(env.get_var("FRESH").as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_delete_removes_variable_and_cache_entry() {
        let (env, store) = store_with(InMemoryEnvironment::new());
        store.set("TEMP", "1").await.unwrap();
        store.delete("TEMP").await.unwrap();
        assert_eq!(env.get_var("TEMP"), None);
        assert!(store.observed().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_never_set_key() {
        let (_, store) = store_with(InMemoryEnvironment::new());
        store.set("KEEP", "1").await.unwrap();
        store.delete("NEVER_SET").await.unwrap();
        let observed = store.observed().await;
        assert_eq!(observed.len(), 1);
        assert_eq!(observed["KEEP"], "1");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_cache() {
        let env = InMemoryEnvironment::from_pairs([("LOCKED", "x")]);
        env.fail_on("LOCKED");
        let (_, store) = store_with(env);
        store.get("LOCKED").await.unwrap();

        let err = store.delete("LOCKED").await.unwrap_err();
        assert!(matches!(
            err,
            ConfigStoreError::LocalOperation { operation: "delete", .. }
        ));
        assert_eq!(store.observed().await["LOCKED"], "x");
    }

    #[tokio::test]
    async fn test_forget_keeps_process_value() {
        let (env, store) = store_with(InMemoryEnvironment::from_pairs([("KEY", "v")]));
        store.get("KEY").await.unwrap();
        store.forget("KEY").await;
        assert!(store.observed().await.is_empty());
        assert_eq!(env.get_var("KEY").as_deref(), Some("v"));
    }
}
