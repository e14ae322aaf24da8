// 默认值常量 - 统一管理参数存储访问的默认配置
// 在没有显式配置时作为回退值使用

/// 默认区域
pub const DEFAULT_REGION: &str = "eu-north-1";

/// 默认键分隔符
pub const DEFAULT_KEY_DELIMITER: &str = "_";

/// 默认请求超时时间(秒)
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// 环境变量前缀，用于覆盖配置文件
pub const ENV_PREFIX: &str = "PARAMSTORE";

/// 配置文件的默认查找路径
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "config/paramstore.toml",
    "paramstore.toml",
    "/etc/paramstore/config.toml",
];

/// 环境凭证变量名
pub mod credential_vars {
    /// Access key ID，按顺序查找
    pub const ACCESS_KEY_ID: [&str; 2] = ["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY"];

    /// Secret access key，按顺序查找
    pub const SECRET_ACCESS_KEY: [&str; 2] = ["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY"];

    /// 可选的会话令牌
    pub const SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
}
