use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use paramstore_errors::{ConfigStoreError, ConfigStoreResult, ParameterStoreError};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{
    GetParametersByPathRequest, Parameter, ParameterPage, PutParameterRequest, SessionConfig,
};
use crate::traits::{ParameterStoreClient, SessionConnector};

const DEFAULT_PAGE_SIZE: usize = 10;

/// 内存参数存储实现
///
/// 行为与远程参数存储一致：路径唯一、覆盖写入递增版本号、列举结果按路径排序分页。
/// 适用于测试和离线场景，可以从 TOML 快照加载初始参数。
#[derive(Debug)]
pub struct InMemoryParameterStore {
    parameters: RwLock<BTreeMap<String, Parameter>>,
    page_size: usize,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(BTreeMap::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 设置每页返回的最大参数数量（至少为 1）
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// 使用 (路径, 值) 列表初始化
    pub fn from_parameters<I, N, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let parameters = parameters
            .into_iter()
            .map(|(name, value)| {
                let name = name.into();
                let parameter = Parameter {
                    name: name.clone(),
                    value: value.into(),
                    parameter_type: Default::default(),
                    version: 1,
                };
                (name, parameter)
            })
            .collect();

        Self {
            parameters: RwLock::new(parameters),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 从 TOML 快照解析参数
    ///
    /// 嵌套表映射为路径层级：
    ///
    /// ```toml
    /// [dev.hello]
    /// world = "value"     # -> /dev/hello/world
    /// ```
    pub fn from_snapshot_toml(snapshot: &str) -> ConfigStoreResult<Self> {
        let table: toml::Table = toml::from_str(snapshot)
            .map_err(|e| ConfigStoreError::config_error(format!("解析参数快照失败: {e}")))?;

        let mut flattened = BTreeMap::new();
        flatten_snapshot("", &table, &mut flattened).map_err(ConfigStoreError::config_error)?;

        Ok(Self::from_parameters(flattened))
    }

    /// 从 TOML 快照文件加载参数
    pub fn load_snapshot(path: &Path) -> ConfigStoreResult<Self> {
        let snapshot = std::fs::read_to_string(path).map_err(|e| {
            ConfigStoreError::config_error(format!(
                "读取参数快照失败: {} - {e}",
                path.display()
            ))
        })?;
        let store = Self::from_snapshot_toml(&snapshot)?;
        info!(path = %path.display(), "已加载参数快照");
        Ok(store)
    }

    pub async fn len(&self) -> usize {
        self.parameters.read().await.len()
    }

    /// 按路径读取参数（不经过客户端接口）
    pub async fn parameter(&self, name: &str) -> Option<Parameter> {
        self.parameters.read().await.get(name).cloned()
    }
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_snapshot(
    prefix: &str,
    table: &toml::Table,
    out: &mut BTreeMap<String, String>,
) -> Result<(), String> {
    for (segment, value) in table {
        let path = format!("{prefix}/{}", segment.trim_matches('/'));
        match value {
            toml::Value::String(value) => {
                out.insert(path, value.clone());
            }
            toml::Value::Table(nested) => flatten_snapshot(&path, nested, out)?,
            other => {
                return Err(format!(
                    "参数 {path} 的值必须是字符串，实际为 {}",
                    other.type_str()
                ))
            }
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ParameterStoreError> {
    if !name.starts_with('/') || name.len() < 2 {
        return Err(ParameterStoreError::InvalidRequest(format!(
            "参数名称必须是以 / 开头的完整路径: {name}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ParameterStoreClient for InMemoryParameterStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<(), ParameterStoreError> {
        validate_name(&request.name)?;
        let mut parameters = self.parameters.write().await;

        let version = match parameters.get(&request.name) {
            Some(_) if !request.overwrite => {
                return Err(ParameterStoreError::already_exists(request.name));
            }
            Some(existing) => existing.version + 1,
            None => 1,
        };

        debug!(
            name = %request.name,
            version,
            parameter_type = %request.parameter_type,
            "写入参数"
        );
        parameters.insert(
            request.name.clone(),
            Parameter {
                name: request.name,
                value: request.value,
                parameter_type: request.parameter_type,
                version,
            },
        );
        Ok(())
    }

    async fn get_parameter(&self, name: &str) -> Result<Parameter, ParameterStoreError> {
        let parameters = self.parameters.read().await;
        parameters
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterStoreError::not_found(name))
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), ParameterStoreError> {
        let mut parameters = self.parameters.write().await;
        match parameters.remove(name) {
            Some(_) => Ok(()),
            None => Err(ParameterStoreError::not_found(name)),
        }
    }

    async fn get_parameters_by_path(
        &self,
        request: GetParametersByPathRequest,
    ) -> Result<ParameterPage, ParameterStoreError> {
        validate_name(&request.path)?;
        let prefix = if request.path.ends_with('/') {
            request.path.clone()
        } else {
            format!("{}/", request.path)
        };

        let offset = match &request.next_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                ParameterStoreError::InvalidRequest(format!("无效的分页令牌: {token}"))
            })?,
            None => 0,
        };

        let parameters = self.parameters.read().await;
        let matching: Vec<&Parameter> = parameters
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| request.recursive || !name[prefix.len()..].contains('/'))
            .map(|(_, parameter)| parameter)
            .collect();

        let page: Vec<Parameter> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|parameter| (*parameter).clone())
            .collect();

        let consumed = offset + page.len();
        let next_token = (consumed < matching.len()).then(|| consumed.to_string());

        Ok(ParameterPage {
            parameters: page,
            next_token,
        })
    }
}

/// 返回固定内存参数存储的会话连接器
///
/// 可以限定允许的区域，用于模拟会话初始化失败。
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    store: Arc<InMemoryParameterStore>,
    allowed_regions: Option<Vec<String>>,
}

impl InMemoryConnector {
    pub fn new(store: Arc<InMemoryParameterStore>) -> Self {
        Self {
            store,
            allowed_regions: None,
        }
    }

    pub fn with_allowed_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl SessionConnector for InMemoryConnector {
    async fn connect(
        &self,
        config: &SessionConfig,
    ) -> Result<Arc<dyn ParameterStoreClient>, ParameterStoreError> {
        if let Some(regions) = &self.allowed_regions {
            if !regions.iter().any(|region| region == &config.region) {
                return Err(ParameterStoreError::service(format!(
                    "不支持的区域: {}",
                    config.region
                )));
            }
        }
        Ok(self.store.clone() as Arc<dyn ParameterStoreClient>)
    }
}
