//! HTTP客户端配置

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use courier_core::{DispatchError, DispatchResult};

/// HTTP客户端配置
///
/// 工厂每次产出客户端时按此配置构建。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// 服务端基础地址
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// User-Agent请求头
    pub user_agent: String,
    /// 附加到每个请求的默认请求头
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
            user_agent: format!("courier/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// 从TOML文本加载配置
    pub fn from_toml_str(content: &str) -> DispatchResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DispatchError::Configuration(format!("解析TOML配置失败: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file(path: impl AsRef<Path>) -> DispatchResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DispatchError::Configuration(format!(
                "读取配置文件失败: {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// 校验配置项
    pub fn validate(&self) -> DispatchResult<()> {
        if self.base_url.is_empty() {
            return Err(DispatchError::Configuration(
                "base_url不能为空".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(DispatchError::Configuration(format!(
                "base_url必须以http://或https://开头: {}",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(DispatchError::Configuration(
                "timeout_seconds必须大于0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HttpClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_from_toml_str_with_partial_fields() {
        let config = HttpClientConfig::from_toml_str(
            r#"
            base_url = "https://api.example.com"
            timeout_seconds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_seconds, 5);
        // 未给出的字段取默认值
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(HttpClientConfig::from_toml_str(r#"base_url = """#).is_err());
        assert!(HttpClientConfig::from_toml_str(r#"base_url = "ftp://x""#).is_err());
        assert!(HttpClientConfig::from_toml_str(
            r#"
            base_url = "http://x"
            timeout_seconds = 0
            "#
        )
        .is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://files.example.com\"").unwrap();

        let config = HttpClientConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://files.example.com");
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = HttpClientConfig::from_toml_file("/nonexistent/courier.toml").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }
}
