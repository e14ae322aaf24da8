//! 远程参数存储适配器
//!
//! 把扁平键通过 [`KeyPathCodec`] 转换为环境作用域下的路径，再委托给
//! [`ParameterStoreClient`]。读取始终直接访问远程，不做本地缓存。

pub mod credentials;
pub mod in_memory;

pub use credentials::resolve_credentials;
pub use in_memory::{InMemoryConnector, InMemoryParameterStore};

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use paramstore_config::{ConfigValidator, RemoteStoreSettings};
use paramstore_errors::{ConfigStoreError, ConfigStoreResult, ParameterStoreError};
use tracing::{debug, info, instrument};

use crate::codec::KeyPathCodec;
use crate::local::SystemEnvironment;
use crate::models::{GetParametersByPathRequest, ParameterType, PutParameterRequest, SessionConfig};
use crate::traits::{
    ConfigurationStore, LocalEnvironmentPort, ParameterStoreClient, SessionConnector,
};

/// 远程参数存储适配器
pub struct RemoteStore {
    client: Arc<dyn ParameterStoreClient>,
    codec: KeyPathCodec,
    parameter_type: ParameterType,
}

impl RemoteStore {
    /// 使用进程环境解析凭证并建立远程会话
    pub async fn connect(
        settings: &RemoteStoreSettings,
        connector: &dyn SessionConnector,
    ) -> ConfigStoreResult<Self> {
        Self::connect_with_environment(settings, connector, &SystemEnvironment).await
    }

    /// 建立远程会话，凭证从给定的环境端口解析
    ///
    /// 凭证不可用时返回 `MissingCredentials`，会话建立失败时返回 `SessionInit`，均不重试。
    pub async fn connect_with_environment(
        settings: &RemoteStoreSettings,
        connector: &dyn SessionConnector,
        env: &dyn LocalEnvironmentPort,
    ) -> ConfigStoreResult<Self> {
        let credentials = resolve_credentials(settings, env)?;
        settings
            .validate()
            .map_err(|e| ConfigStoreError::config_error(e.to_string()))?;

        let session = SessionConfig {
            region: settings.effective_region().to_string(),
            credentials,
            request_timeout: settings.request_timeout(),
        };

        let client = connector
            .connect(&session)
            .await
            .map_err(|e| ConfigStoreError::session_init(e.to_string()))?;

        info!(
            environment = %settings.environment,
            region = %session.region,
            "已连接远程参数存储"
        );

        Ok(Self::with_client(
            client,
            settings.environment.clone(),
            settings.effective_key_delimiter().to_string(),
        ))
    }

    /// 使用已创建的客户端构造适配器
    pub fn with_client<E: Into<String>, D: Into<String>>(
        client: Arc<dyn ParameterStoreClient>,
        environment: E,
        delimiter: D,
    ) -> Self {
        Self {
            client,
            codec: KeyPathCodec::new(environment, delimiter),
            parameter_type: ParameterType::default(),
        }
    }

    /// 写入时使用的参数类型标记，默认 `String`
    pub fn with_parameter_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = parameter_type;
        self
    }

    pub fn codec(&self) -> &KeyPathCodec {
        &self.codec
    }

    pub fn environment(&self) -> &str {
        self.codec.environment()
    }

    async fn put(&self, key: &str, value: &str, overwrite: bool) -> Result<(), ParameterStoreError> {
        let request = PutParameterRequest::new(self.codec.path_of(key), value, overwrite)
            .with_parameter_type(self.parameter_type);
        self.client.put_parameter(request).await
    }
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("codec", &self.codec)
            .field("parameter_type", &self.parameter_type)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ConfigurationStore for RemoteStore {
    #[instrument(skip_all, fields(key = %key))]
    async fn create(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.put(key, value, false)
            .await
            .map_err(|e| ConfigStoreError::remote("create", key, e))
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn set(&self, key: &str, value: &str) -> ConfigStoreResult<()> {
        self.put(key, value, true)
            .await
            .map_err(|e| ConfigStoreError::remote("set", key, e))
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn delete(&self, key: &str) -> ConfigStoreResult<()> {
        self.client
            .delete_parameter(&self.codec.path_of(key))
            .await
            .map_err(|e| ConfigStoreError::remote("delete", key, e))
    }

    #[instrument(skip_all, fields(key = %key))]
    async fn get(&self, key: &str) -> ConfigStoreResult<String> {
        match self.client.get_parameter(&self.codec.path_of(key)).await {
            Ok(parameter) => Ok(parameter.value),
            Err(ParameterStoreError::ParameterNotFound { .. }) => {
                Err(ConfigStoreError::not_found(key))
            }
            Err(e) => Err(ConfigStoreError::remote("get", key, e)),
        }
    }

    #[instrument(skip_all)]
    async fn get_environment(&self) -> ConfigStoreResult<HashMap<String, String>> {
        let root = self.codec.root_path();
        let mut values = HashMap::new();
        let mut request = GetParametersByPathRequest::recursive(root.clone());
        let mut pages = 0usize;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self
                .client
                .get_parameters_by_path(request.clone())
                .await
                .map_err(|e| ConfigStoreError::remote("list", root.clone(), e))?;
            pages += 1;

            for parameter in page.parameters {
                values.insert(self.codec.key_of(&parameter.name), parameter.value);
            }

            match page.next_token {
                None => break,
                Some(token) if !seen_tokens.insert(token.clone()) => {
                    return Err(ConfigStoreError::remote(
                        "list",
                        root.clone(),
                        ParameterStoreError::InvalidRequest(format!("分页令牌重复: {token}")),
                    ));
                }
                Some(token) => request = request.with_next_token(Some(token)),
            }
        }

        debug!(
            environment = %self.codec.environment(),
            pages,
            count = values.len(),
            "已列举远程参数"
        );
        Ok(values)
    }
}
