//! 双源配置访问核心
//!
//! 远程参数存储与本地环境变量两个数据源，通过 [`DualSourceResolver`] 组合为一个逻辑配置源。

pub mod codec;
pub mod local;
pub mod models;
pub mod remote;
pub mod resolver;
pub mod traits;

pub use codec::{key_of, path_of, KeyPathCodec};
pub use local::{InMemoryEnvironment, LocalStore, SystemEnvironment};
pub use models::{
    GetParametersByPathRequest, Parameter, ParameterPage, ParameterType, PutParameterRequest,
    SessionConfig,
};
pub use remote::{InMemoryConnector, InMemoryParameterStore, RemoteStore};
pub use resolver::DualSourceResolver;
pub use traits::{ConfigurationStore, LocalEnvironmentPort, ParameterStoreClient, SessionConnector};

pub use paramstore_errors::{ConfigStoreError, ConfigStoreResult, ParameterStoreError};
