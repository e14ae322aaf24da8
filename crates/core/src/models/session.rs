use std::time::Duration;

use paramstore_config::StaticCredentials;

/// 远程会话参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub region: String,
    pub credentials: StaticCredentials,
    pub request_timeout: Duration,
}
