use thiserror::Error;

/// 参数存储客户端错误
///
/// 由远程参数存储客户端（`ParameterStoreClient` 的实现）返回，
/// 适配层会把它包装进 [`ConfigStoreError`]。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterStoreError {
    #[error("参数不存在: {name}")]
    ParameterNotFound { name: String },
    #[error("参数已存在: {name}")]
    ParameterAlreadyExists { name: String },
    #[error("无效的参数请求: {0}")]
    InvalidRequest(String),
    #[error("参数存储服务错误: {0}")]
    Service(String),
}

impl ParameterStoreError {
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::ParameterNotFound { name: name.into() }
    }
    pub fn already_exists<S: Into<String>>(name: S) -> Self {
        Self::ParameterAlreadyExists { name: name.into() }
    }
    pub fn service<S: Into<String>>(msg: S) -> Self {
        Self::Service(msg.into())
    }
}

/// 配置访问错误类型定义
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("缺少访问凭证: {0}")]
    MissingCredentials(String),
    #[error("初始化远程会话失败: {0}")]
    SessionInit(String),
    #[error("no value with key {key}")]
    NotFound { key: String },
    #[error("远程{operation}操作失败 (key: {key}): {source}")]
    RemoteOperation {
        operation: &'static str,
        key: String,
        #[source]
        source: ParameterStoreError,
    },
    #[error("本地{operation}操作失败 (key: {key}): {message}")]
    LocalOperation {
        operation: &'static str,
        key: String,
        message: String,
    },
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("{}", format_multiple(.0))]
    Multiple(Vec<ConfigStoreError>),
}

pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

impl ConfigStoreError {
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::NotFound { key: key.into() }
    }
    pub fn missing_credentials<S: Into<String>>(msg: S) -> Self {
        Self::MissingCredentials(msg.into())
    }
    pub fn session_init<S: Into<String>>(msg: S) -> Self {
        Self::SessionInit(msg.into())
    }
    pub fn remote<S: Into<String>>(
        operation: &'static str,
        key: S,
        source: ParameterStoreError,
    ) -> Self {
        Self::RemoteOperation {
            operation,
            key: key.into(),
            source,
        }
    }
    pub fn local<K: Into<String>, M: Into<String>>(
        operation: &'static str,
        key: K,
        message: M,
    ) -> Self {
        Self::LocalOperation {
            operation,
            key: key.into(),
            message: message.into(),
        }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigStoreError::NotFound { .. })
    }
    pub fn is_already_exists(&self) -> bool {
        match self {
            ConfigStoreError::RemoteOperation { source, .. } => {
                matches!(source, ParameterStoreError::ParameterAlreadyExists { .. })
            }
            ConfigStoreError::LocalOperation { operation, .. } => *operation == "create",
            _ => false,
        }
    }
    /// 错误涉及的配置键（如果有）
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigStoreError::NotFound { key }
            | ConfigStoreError::RemoteOperation { key, .. }
            | ConfigStoreError::LocalOperation { key, .. } => Some(key),
            _ => None,
        }
    }
}

fn format_multiple(errors: &[ConfigStoreError]) -> String {
    let parts: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!("多个操作失败: [{}]", parts.join("; "))
}

#[cfg(test)]
mod tests;
