use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{logging::LogConfig, remote::RemoteStoreSettings};
use crate::defaults::{
    DEFAULT_CONFIG_PATHS, DEFAULT_KEY_DELIMITER, DEFAULT_REQUEST_TIMEOUT_SECONDS, ENV_PREFIX,
};
use crate::validation::{ConfigValidator, ValidationUtils};
use crate::{ConfigError, ConfigResult};

/// 远程参数存储配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// 为 false 时解析器只使用本地环境变量
    pub enabled: bool,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub use_environment_credentials: bool,
    /// 客户端请求超时（秒），0 表示默认值
    pub request_timeout_seconds: u64,
    /// 离线参数快照（TOML），设置后远程存储由内存实现提供
    pub snapshot_path: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            use_environment_credentials: false,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            snapshot_path: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamstoreConfig {
    /// 环境作用域
    pub environment: String,
    pub key_delimiter: String,
    pub remote: RemoteConfig,
    pub logging: LogConfig,
}

impl Default for ParamstoreConfig {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            remote: RemoteConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl ParamstoreConfig {
    /// 加载配置：配置文件 + `PARAMSTORE_` 前缀的环境变量
    ///
    /// 嵌套字段使用 `__` 分隔，例如 `PARAMSTORE_REMOTE__ENABLED=true`。
    pub fn load(config_path: Option<&str>) -> ConfigResult<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("environment", "dev")?
            .set_default("key_delimiter", DEFAULT_KEY_DELIMITER)?
            .set_default("remote.enabled", false)?
            .set_default(
                "remote.request_timeout_seconds",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        if let Some(path) = config_path {
            if !Path::new(path).exists() {
                return Err(ConfigError::File(format!("配置文件不存在: {path}")));
            }
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        } else if let Some(path) = DEFAULT_CONFIG_PATHS
            .iter()
            .find(|path| Path::new(path).exists())
        {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: ParamstoreConfig = builder
            .build()
            .map_err(|e| ConfigError::Configuration(format!("构建配置失败: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(format!("反序列化配置失败: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: ParamstoreConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 构造远程参数存储的参数
    pub fn remote_settings(&self) -> RemoteStoreSettings {
        RemoteStoreSettings {
            environment: self.environment.clone(),
            key_delimiter: self.key_delimiter.clone(),
            region: self.remote.region.clone(),
            access_key_id: self.remote.access_key_id.clone(),
            secret_access_key: self.remote.secret_access_key.clone(),
            use_environment_credentials: self.remote.use_environment_credentials,
            request_timeout_seconds: self.remote.request_timeout_seconds,
        }
    }
}

impl ConfigValidator for ParamstoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.environment, "environment")?;
        ValidationUtils::validate_path_segment(&self.environment, "environment")?;
        ValidationUtils::validate_path_segment(&self.key_delimiter, "key_delimiter")?;
        // 0 表示使用默认超时
        if self.remote.request_timeout_seconds != 0 {
            ValidationUtils::validate_timeout_seconds(self.remote.request_timeout_seconds)?;
        }
        if let Some(snapshot) = &self.remote.snapshot_path {
            ValidationUtils::validate_not_empty(snapshot, "remote.snapshot_path")?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogLevel, OutputFormat};
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ParamstoreConfig::default();
        assert_eq!(config.environment, "dev");
        assert_eq!(config.key_delimiter, "_");
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.request_timeout_seconds, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
environment = "prod"
key_delimiter = "."

[remote]
enabled = true
region = "us-east-1"
use_environment_credentials = true

[logging]
level = "debug"
format = "json"
"#;
        let config = ParamstoreConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.environment, "prod");
        assert!(config.remote.enabled);
        assert_eq!(config.remote.request_timeout_seconds, 30);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, OutputFormat::Json);

        let settings = config.remote_settings();
        assert_eq!(settings.environment, "prod");
        assert_eq!(settings.effective_key_delimiter(), ".");
        assert_eq!(settings.effective_region(), "us-east-1");
        assert!(settings.use_environment_credentials);
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = ParamstoreConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed = ParamstoreConfig::from_toml(&rendered).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_validation_rejects_bad_environment() {
        let err = ParamstoreConfig::from_toml("environment = \"dev/x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = ParamstoreConfig::from_toml("environment = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_timeout_means_default() {
        let config = ParamstoreConfig::from_toml("[remote]\nrequest_timeout_seconds = 0\n").unwrap();
        assert_eq!(config.remote.request_timeout_seconds, 0);
        assert_eq!(
            config.remote_settings().request_timeout(),
            std::time::Duration::from_secs(30)
        );

        let err = ParamstoreConfig::from_toml("[remote]\nrequest_timeout_seconds = 7200\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ParamstoreConfig::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::File(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
environment = "staging"

[remote]
enabled = true
access_key_id = "AKIA"
secret_access_key = "secret"
snapshot_path = "params.toml"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let config = ParamstoreConfig::load(Some(&path)).unwrap();
        assert_eq!(config.environment, "staging");
        assert_eq!(config.key_delimiter, "_");
        assert!(config.remote.enabled);
        assert_eq!(config.remote.snapshot_path.as_deref(), Some("params.toml"));
        assert_eq!(config.logging.level, LogLevel::Info);
    }
}
