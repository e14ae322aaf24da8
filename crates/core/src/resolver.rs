//! 双源配置解析器
//!
//! 组合一个本地适配器和可选的远程适配器。读取顺序：覆盖缓存，远程，本地。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use paramstore_config::ParamstoreConfig;
use paramstore_errors::{ConfigStoreError, ConfigStoreResult};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::local::LocalStore;
use crate::remote::RemoteStore;
use crate::traits::{ConfigurationStore, LocalEnvironmentPort, SessionConnector};

/// 双源配置解析器
///
/// 是否配置远程源在构造时确定，之后不再改变。
pub struct DualSourceResolver {
    local: LocalStore,
    remote: Option<Arc<dyn ConfigurationStore>>,
    overrides: RwLock<HashMap<String, String>>,
}

impl DualSourceResolver {
    /// 只使用本地源
    pub fn new(local: LocalStore) -> Self {
        Self {
            local,
            remote: None,
            overrides: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_remote(local: LocalStore, remote: Arc<dyn ConfigurationStore>) -> Self {
        Self {
            local,
            remote: Some(remote),
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// 根据应用配置构造解析器
    ///
    /// `remote.enabled` 为 false 时只使用本地源；远程连接失败直接返回错误。
    pub async fn from_config(
        config: &ParamstoreConfig,
        port: Arc<dyn LocalEnvironmentPort>,
        connector: &dyn SessionConnector,
    ) -> ConfigStoreResult<Self> {
        let local = LocalStore::new(port.clone());
        if !config.remote.enabled {
            info!(environment = %config.environment, "未启用远程参数存储，只使用本地环境变量");
            return Ok(Self::new(local));
        }

        let settings = config.remote_settings();
        let remote =
            RemoteStore::connect_with_environment(&settings, connector, port.as_ref()).await?;
        Ok(Self::with_remote(local, Arc::new(remote)))
    }

    pub fn is_remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// 设置覆盖值，读取时优先于任何数据源
    pub async fn set_override<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.overrides.write().await.insert(key.into(), value.into());
    }

    pub async fn clear_override(&self, key: &str) -> Option<String> {
        self.overrides.write().await.remove(key)
    }

    pub async fn overrides(&self) -> HashMap<String, String> {
        self.overrides.read().await.clone()
    }

    /// 删除配置项并返回全部失败
    ///
    /// 远程和本地的删除都会执行；缓存清理不受失败影响。
    #[instrument(skip_all, fields(key = %key))]
    pub async fn delete_strict(&self, key: &str) -> ConfigStoreResult<()> {
        let mut errors = Vec::new();

        if let Some(remote) = &self.remote {
            if let Err(e) = remote.delete(key).await {
                errors.push(e);
            }
        }
        if let Err(e) = self.local.delete(key).await {
            errors.push(e);
        }

        self.overrides.write().await.remove(key);
        self.local.forget(key).await;

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ConfigStoreError::Multiple(errors)),
        }
    }

    fn write_target(&self) -> &dyn ConfigurationStore {
        match &self.remote {
            Some(remote) => remote.as_ref(),
            None => &self.local as &dyn ConfigurationStore,
        }
    }
}

impl std::fmt::Debug for DualSourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualSourceResolver")
            .field("local", &self.local)
            .field("remote_configured", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ConfigurationStore for DualSourceResolver {
    #[instrument(skip_all, fields(key = %key))]
    async fn create(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.write_target().create(key, value).await
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn set(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.write_target().set(key, value).await
    }

    /// 总是返回 `Ok`，底层失败只记录日志
    #[instrument(skip_all, fields(key = %key))]
    async fn delete(&self, key: &str) -> ConfigStoreResult<()> {
        if let Err(e) = self.delete_strict(key).await {
            warn!(error = %e, "删除配置项失败");
        }
        Ok(())
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn get(&self, key: &str) -> ConfigStoreResult<String> {
        if let Some(value) = self.overrides.read().await.get(key) {
            return Ok(value.clone());
        }

        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(value) => return Ok(value),
                Err(e) => debug!(error = %e, "远程读取失败，回退到本地环境变量"),
            }
        }

        self.local.get(key).await
    }

    #[instrument(skip_all)]
    async fn get_environment(&self) -> ConfigStoreResult<HashMap<String, String>> {
        let mut values = self.local.get_environment().await?;
        if let Some(remote) = &self.remote {
            values.extend(remote.get_environment().await?);
        }
        Ok(values)
    }
}
