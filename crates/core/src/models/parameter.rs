use serde::{Deserialize, Serialize};

/// 参数类型标记
///
/// 仅作为元数据传递给远程存储，本库不做任何加解密。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParameterType {
    #[default]
    #[serde(rename = "String")]
    String,
    #[serde(rename = "StringList")]
    StringList,
    #[serde(rename = "SecureString")]
    SecureString,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterType::String => write!(f, "String"),
            ParameterType::StringList => write!(f, "StringList"),
            ParameterType::SecureString => write!(f, "SecureString"),
        }
    }
}

/// 远程参数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub parameter_type: ParameterType,
    pub version: i64,
}

/// 写入参数请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterRequest {
    pub name: String,
    pub value: String,
    pub parameter_type: ParameterType,
    pub overwrite: bool,
}

impl PutParameterRequest {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V, overwrite: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            parameter_type: ParameterType::String,
            overwrite,
        }
    }

    pub fn with_parameter_type(mut self, parameter_type: ParameterType) -> Self {
        self.parameter_type = parameter_type;
        self
    }
}

/// 按路径列举参数的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetParametersByPathRequest {
    pub path: String,
    pub recursive: bool,
    pub next_token: Option<String>,
}

impl GetParametersByPathRequest {
    pub fn recursive<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            recursive: true,
            next_token: None,
        }
    }

    pub fn with_next_token(mut self, token: Option<String>) -> Self {
        self.next_token = token;
        self
    }
}

/// 列举结果的一页
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    pub next_token: Option<String>,
}

impl ParameterPage {
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}
