use std::sync::Arc;

use async_trait::async_trait;
use paramstore_errors::ParameterStoreError;

use crate::models::{
    GetParametersByPathRequest, Parameter, ParameterPage, PutParameterRequest, SessionConfig,
};

/// 远程参数存储客户端抽象接口
///
/// 所有名称都是完整路径（例如 `/dev/hello/world`），键到路径的转换由适配器完成。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParameterStoreClient: Send + Sync {
    /// 写入参数，`overwrite` 为 false 且路径已存在时返回 `ParameterAlreadyExists`
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<(), ParameterStoreError>;

    /// 读取参数，不存在时返回 `ParameterNotFound`
    async fn get_parameter(&self, name: &str) -> Result<Parameter, ParameterStoreError>;

    /// 删除参数
    async fn delete_parameter(&self, name: &str) -> Result<(), ParameterStoreError>;

    /// 按路径前缀列举参数的一页
    async fn get_parameters_by_path(
        &self,
        request: GetParametersByPathRequest,
    ) -> Result<ParameterPage, ParameterStoreError>;
}

/// 远程会话建立接口
///
/// 使用已解析的凭证和区域创建客户端，失败时不重试。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(
        &self,
        config: &SessionConfig,
    ) -> Result<Arc<dyn ParameterStoreClient>, ParameterStoreError>;
}
