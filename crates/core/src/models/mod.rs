//! # 数据模型
//!
//! 远程参数存储客户端使用的请求与响应结构。
//!
//! ## 核心模型
//!
//! ### Parameter - 参数
//! 远程存储中的一条记录：路径形式的名称、字符串值、类型标记和版本号。
//!
//! ### PutParameterRequest - 写入请求
//! `overwrite` 为 false 时，已存在的路径会被客户端拒绝。
//!
//! ### GetParametersByPathRequest / ParameterPage - 分页列举
//! 按路径前缀列举参数，`next_token` 为 `None` 表示最后一页。
//!
//! ### SessionConfig - 会话参数
//! 区域、已解析的凭证和请求超时，交给 `SessionConnector` 创建客户端。

pub mod parameter;
pub mod session;

pub use parameter::*;
pub use session::*;
