use std::collections::HashMap;

use async_trait::async_trait;
use paramstore_errors::ConfigStoreResult;

/// 配置存储抽象接口
///
/// 远程适配器、本地适配器和双源解析器都实现此接口，
/// 调用方可以把任意一个当作 `Arc<dyn ConfigurationStore>` 使用。
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// 创建新配置项，键已存在时返回错误
    async fn create(&self, key: &str, value: &str) -> ConfigStoreResult<()>;

    /// 创建或覆盖配置项
    async fn set(&self, key: &str, value: &str) -> ConfigStoreResult<()>;

    /// 删除配置项
    async fn delete(&self, key: &str) -> ConfigStoreResult<()>;

    /// 读取配置项，不存在时返回 `NotFound`
    async fn get(&self, key: &str) -> ConfigStoreResult<String>;

    /// 返回当前可见的全部配置项
    ///
    /// 各实现的可见范围不同：远程适配器返回环境作用域下的完整列表，
    /// 本地适配器只返回本实例读写过的键。
    async fn get_environment(&self) -> ConfigStoreResult<HashMap<String, String>>;
}
