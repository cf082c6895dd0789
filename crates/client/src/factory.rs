//! HTTP客户端工厂

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use courier_core::{ClientFactory, ClientHandle, DispatchError, DispatchResult};

use crate::{config::HttpClientConfig, proxy::HttpClientHandle, registry::ServiceRegistry};

/// 按配置产出reqwest客户端句柄的工厂
///
/// 每次 `create_client` 都构建一个新的客户端；解析缓存的绑定粘
/// 住首次解析时的那一个。
pub struct HttpClientFactory {
    config: HttpClientConfig,
    registry: Arc<ServiceRegistry>,
}

impl HttpClientFactory {
    pub fn new(config: HttpClientConfig, registry: ServiceRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn build_headers(&self) -> DispatchResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                DispatchError::ClientConstruction(format!("非法请求头名 {key}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                DispatchError::ClientConstruction(format!("非法请求头值 {key}: {e}"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl ClientFactory for HttpClientFactory {
    fn create_client(&self) -> DispatchResult<Arc<dyn ClientHandle>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(self.config.user_agent.clone())
            .default_headers(self.build_headers()?)
            .build()
            .map_err(|e| DispatchError::ClientConstruction(e.to_string()))?;

        debug!(
            "创建HTTP客户端: base_url={}, timeout={}s",
            self.config.base_url, self.config.timeout_seconds
        );

        Ok(Arc::new(HttpClientHandle::new(
            client,
            self.config.base_url.trim_end_matches('/').to_string(),
            self.registry.clone(),
        )))
    }
}
