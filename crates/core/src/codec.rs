//! 键与路径的双向转换
//!
//! 扁平键（`HELLO_WORLD`）与环境作用域下的层级路径（`/dev/hello/world`）之间的纯函数转换。

/// 把扁平键转换为环境作用域下的路径
///
/// 键中的每个分隔符替换为 `/`，整体转为小写并加上 `/{env}/` 前缀。
/// 分隔符为空时不做替换。
pub fn path_of(key: &str, env: &str, delimiter: &str) -> String {
    let hierarchical = if delimiter.is_empty() {
        key.to_string()
    } else {
        key.replace(delimiter, "/")
    };
    format!("/{env}/{hierarchical}").to_lowercase()
}

/// 把路径转换回扁平键
///
/// 只移除第一次出现的 `/{env}/`（环境按小写匹配），剩余的 `/` 替换为分隔符后转为小写。
/// 路径不含该前缀时原样保留，不报错。
pub fn key_of(path: &str, env: &str, delimiter: &str) -> String {
    let prefix = format!("/{env}/").to_lowercase();
    let key = path.to_lowercase().replacen(&prefix, "", 1);
    key.replace('/', delimiter).to_lowercase()
}

/// 绑定了环境作用域和分隔符的编解码器
///
/// 远程路径全部为小写，环境作用域在构造时转为小写。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPathCodec {
    environment: String,
    delimiter: String,
}

impl KeyPathCodec {
    pub fn new<E: Into<String>, D: Into<String>>(environment: E, delimiter: D) -> Self {
        Self {
            environment: environment.into().to_lowercase(),
            delimiter: delimiter.into(),
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn path_of(&self, key: &str) -> String {
        path_of(key, &self.environment, &self.delimiter)
    }

    pub fn key_of(&self, path: &str) -> String {
        key_of(path, &self.environment, &self.delimiter)
    }

    /// 环境作用域的根路径，例如 `/dev/`
    pub fn root_path(&self) -> String {
        format!("/{}/", self.environment)
    }
}
