use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_KEY_DELIMITER, DEFAULT_REGION, DEFAULT_REQUEST_TIMEOUT_SECONDS};
use crate::validation::{ConfigValidator, ValidationUtils};

const REDACTED: &str = "***";

/// 静态访问凭证
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl StaticCredentials {
    pub fn new<A: Into<String>, S: Into<String>>(access_key_id: A, secret_access_key: S) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token<T: Into<String>>(mut self, token: T) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &REDACTED)
            .field("session_token", &self.session_token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// 凭证来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// 显式提供的访问凭证
    Static(StaticCredentials),
    /// 从进程环境变量读取
    Environment,
}

/// 远程参数存储的构造参数
///
/// 空字符串表示"未设置"：区域与键分隔符在构造时回退到默认值，
/// 凭证则必须显式提供或声明从环境变量读取。
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStoreSettings {
    /// 环境作用域，所有远程路径都以 `/{environment}/` 开头
    pub environment: String,
    /// 键分隔符，默认 `_`
    pub key_delimiter: String,
    /// 区域，默认 `eu-north-1`
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// 为 true 时忽略静态凭证，从环境变量读取
    pub use_environment_credentials: bool,
    /// 客户端请求超时（秒），0 表示默认值
    pub request_timeout_seconds: u64,
}

impl RemoteStoreSettings {
    pub fn new<S: Into<String>>(environment: S) -> Self {
        Self {
            environment: environment.into(),
            ..Default::default()
        }
    }

    pub fn with_key_delimiter<S: Into<String>>(mut self, delimiter: S) -> Self {
        self.key_delimiter = delimiter.into();
        self
    }

    pub fn with_region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_static_credentials<A: Into<String>, S: Into<String>>(
        mut self,
        access_key_id: A,
        secret_access_key: S,
    ) -> Self {
        self.access_key_id = access_key_id.into();
        self.secret_access_key = secret_access_key.into();
        self.use_environment_credentials = false;
        self
    }

    pub fn with_environment_credentials(mut self) -> Self {
        self.use_environment_credentials = true;
        self
    }

    pub fn with_request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    pub fn effective_region(&self) -> &str {
        if self.region.is_empty() {
            DEFAULT_REGION
        } else {
            &self.region
        }
    }

    pub fn effective_key_delimiter(&self) -> &str {
        if self.key_delimiter.is_empty() {
            DEFAULT_KEY_DELIMITER
        } else {
            &self.key_delimiter
        }
    }

    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_seconds {
            0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            seconds => Duration::from_secs(seconds),
        }
    }

    /// 解析凭证来源，两者都不可用时返回 None
    pub fn credential_source(&self) -> Option<CredentialSource> {
        if self.use_environment_credentials {
            return Some(CredentialSource::Environment);
        }
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return None;
        }
        Some(CredentialSource::Static(StaticCredentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
        )))
    }
}

impl std::fmt::Debug for RemoteStoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStoreSettings")
            .field("environment", &self.environment)
            .field("key_delimiter", &self.key_delimiter)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &if self.secret_access_key.is_empty() { "" } else { REDACTED },
            )
            .field("use_environment_credentials", &self.use_environment_credentials)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl ConfigValidator for RemoteStoreSettings {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.environment, "remote.environment")?;
        ValidationUtils::validate_path_segment(&self.environment, "remote.environment")?;
        ValidationUtils::validate_path_segment(&self.key_delimiter, "remote.key_delimiter")?;
        if self.request_timeout_seconds != 0 {
            ValidationUtils::validate_timeout_seconds(self.request_timeout_seconds)?;
        }
        Ok(())
    }
}
