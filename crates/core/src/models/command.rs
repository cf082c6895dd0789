use std::fmt;

use crate::{DispatchError, DispatchResult};

/// 请求命令字
///
/// 形如 `"service#method"` 的两段式标识，`#` 为唯一分隔符，
/// 两段均不允许为空。完整字符串同时充当解析缓存的键。
///
/// # 示例
///
/// ```
/// use courier_core::Command;
///
/// let cmd = Command::parse("com.example.UserService#getUser").unwrap();
/// assert_eq!(cmd.service(), "com.example.UserService");
/// assert_eq!(cmd.method(), "getUser");
/// assert_eq!(cmd.to_string(), "com.example.UserService#getUser");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    service: String,
    method: String,
}

impl Command {
    /// 解析命令字字符串
    ///
    /// 按 `#` 切分后必须恰好得到两个非空片段，否则返回
    /// `MalformedCommand`。
    pub fn parse(raw: &str) -> DispatchResult<Self> {
        let parts: Vec<&str> = raw.split('#').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(DispatchError::MalformedCommand {
                command: raw.to_string(),
            });
        }

        Ok(Self {
            service: parts[0].to_string(),
            method: parts[1].to_string(),
        })
    }

    /// 服务标识
    pub fn service(&self) -> &str {
        &self.service
    }

    /// 方法名
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.service, self.method)
    }
}
