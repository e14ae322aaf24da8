//! 进程环境变量访问端口
//!
//! 进程环境是全局状态，直接修改会让并行测试互相干扰。
//! 本地适配器只通过此端口访问环境变量，测试中可以替换为内存实现。

use std::io;

/// 环境变量访问接口
pub trait LocalEnvironmentPort: Send + Sync {
    /// 读取变量，未设置时返回 `None`
    fn get_var(&self, key: &str) -> Option<String>;

    fn set_var(&self, key: &str, value: &str) -> io::Result<()>;

    /// 删除变量，变量不存在时不视为错误
    fn unset_var(&self, key: &str) -> io::Result<()>;
}
