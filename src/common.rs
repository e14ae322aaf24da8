use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use paramstore_config::ParamstoreConfig;
use paramstore_core::{
    ConfigurationStore, DualSourceResolver, InMemoryConnector, InMemoryParameterStore,
    KeyPathCodec, LocalEnvironmentPort, SystemEnvironment,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 命令行启动参数
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub config_path: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

/// 初始化日志系统
pub fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}

/// 加载应用配置，命令行参数覆盖配置文件中的日志设置
pub fn load_config(startup_config: &StartupConfig) -> Result<ParamstoreConfig> {
    let mut config = ParamstoreConfig::load(startup_config.config_path.as_deref())
        .with_context(|| match &startup_config.config_path {
            Some(path) => format!("加载配置文件失败: {path}"),
            None => "加载默认配置失败".to_string(),
        })?;

    if let Some(level) = &startup_config.log_level {
        config.logging.level = level
            .parse()
            .map_err(|e| anyhow::anyhow!("无效的日志级别: {e}"))?;
    }
    if let Some(format) = &startup_config.log_format {
        config.logging.format = format
            .parse()
            .map_err(|e| anyhow::anyhow!("无效的日志格式: {e}"))?;
    }

    Ok(config)
}

/// 构造远程会话连接器
///
/// 远程参数存储由离线快照提供，启用远程时必须设置 `remote.snapshot_path`。
pub fn build_connector(config: &ParamstoreConfig) -> Result<InMemoryConnector> {
    if !config.remote.enabled {
        return Ok(InMemoryConnector::new(Arc::new(InMemoryParameterStore::new())));
    }

    let path = config
        .remote
        .snapshot_path
        .as_deref()
        .context("启用远程参数存储时必须配置 remote.snapshot_path")?;
    let store = InMemoryParameterStore::load_snapshot(Path::new(path))
        .with_context(|| format!("加载参数快照失败: {path}"))?;
    Ok(InMemoryConnector::new(Arc::new(store)))
}

/// 根据配置构造双源解析器
pub async fn build_resolver(
    config: &ParamstoreConfig,
    port: Arc<dyn LocalEnvironmentPort>,
) -> Result<DualSourceResolver> {
    let connector = build_connector(config)?;
    let resolver = DualSourceResolver::from_config(config, port, &connector)
        .await
        .context("初始化配置解析器失败")?;
    info!(
        environment = %config.environment,
        remote = resolver.is_remote_configured(),
        "配置解析器已就绪"
    );
    Ok(resolver)
}

/// 使用进程环境构造解析器
pub async fn build_system_resolver(config: &ParamstoreConfig) -> Result<DualSourceResolver> {
    build_resolver(config, Arc::new(SystemEnvironment::new())).await
}

/// 读取单个配置项
pub async fn read_value(resolver: &DualSourceResolver, key: &str) -> Result<String> {
    resolver
        .get(key)
        .await
        .with_context(|| format!("读取配置项失败: {key}"))
}

/// 合并后的配置视图，按键排序后渲染为 JSON
pub async fn render_environment(resolver: &DualSourceResolver) -> Result<String> {
    let values: BTreeMap<String, String> = resolver
        .get_environment()
        .await
        .context("列举配置项失败")?
        .into_iter()
        .collect();
    serde_json::to_string_pretty(&values).context("序列化配置项失败")
}

/// 键在当前环境作用域下的远程路径
pub fn remote_path(config: &ParamstoreConfig, key: &str) -> String {
    KeyPathCodec::new(config.environment.as_str(), config.key_delimiter.as_str()).path_of(key)
}
