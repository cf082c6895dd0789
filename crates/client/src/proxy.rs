//! reqwest实现的服务代理与远端调用
//!
//! `bind` 把注册表中的服务声明实例化为一组可调用操作；操作的
//! `prepare` 完成路径模板填充与URL拼接，产出一次性的调用句柄，
//! `execute` 真正发起请求。非成功状态码与空载荷的响应体一律按
//! `None` 处理。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use courier_core::{
    CallRequest, ClientHandle, DispatchError, DispatchResult, Operation, RemoteCall,
    RemoteResponse, ServiceProxy,
};

use crate::registry::{HttpMethod, OperationSpec, ServiceRegistry};

/// reqwest客户端句柄
pub struct HttpClientHandle {
    client: reqwest::Client,
    base_url: String,
    registry: Arc<ServiceRegistry>,
}

impl HttpClientHandle {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: String,
        registry: Arc<ServiceRegistry>,
    ) -> Self {
        Self {
            client,
            base_url,
            registry,
        }
    }
}

impl ClientHandle for HttpClientHandle {
    fn bind(&self, service: &str) -> DispatchResult<Arc<dyn ServiceProxy>> {
        let spec = self
            .registry
            .get(service)
            .ok_or_else(|| DispatchError::ServiceNotFound {
                service: service.to_string(),
            })?;

        let operations: Vec<Arc<dyn Operation>> = spec
            .operations()
            .iter()
            .map(|op| {
                Arc::new(HttpOperation {
                    client: self.client.clone(),
                    base_url: self.base_url.clone(),
                    spec: op.clone(),
                }) as Arc<dyn Operation>
            })
            .collect();

        debug!(
            "绑定服务代理: service={}, operations={}",
            service,
            operations.len()
        );

        Ok(Arc::new(HttpServiceProxy {
            service: service.to_string(),
            operations,
        }))
    }
}

struct HttpServiceProxy {
    service: String,
    operations: Vec<Arc<dyn Operation>>,
}

impl ServiceProxy for HttpServiceProxy {
    fn service(&self) -> &str {
        &self.service
    }

    fn operations(&self) -> &[Arc<dyn Operation>] {
        &self.operations
    }
}

struct HttpOperation {
    client: reqwest::Client,
    base_url: String,
    spec: OperationSpec,
}

impl Operation for HttpOperation {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn prepare(&self, request: CallRequest) -> DispatchResult<Box<dyn RemoteCall>> {
        let CallRequest { mut queries, body } = request;
        let path = fill_path(&self.spec.path, &mut queries)?;
        let url = join_url(&self.base_url, &path);

        Ok(Box::new(HttpRemoteCall {
            client: self.client.clone(),
            method: self.spec.method,
            url,
            queries,
            body,
        }))
    }
}

struct HttpRemoteCall {
    client: reqwest::Client,
    method: HttpMethod,
    url: String,
    queries: HashMap<String, String>,
    body: Option<Value>,
}

#[async_trait]
impl RemoteCall for HttpRemoteCall {
    async fn execute(self: Box<Self>) -> DispatchResult<RemoteResponse> {
        let started = Instant::now();

        let mut builder = match self.method {
            HttpMethod::Get => self.client.get(&self.url),
            HttpMethod::Post => self.client.post(&self.url),
        };
        if !self.queries.is_empty() {
            builder = builder.query(&self.queries);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DispatchError::Transport(format!("发送请求失败: {e}")))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(format!("读取响应体失败: {e}")))?;

        let body = if !(200..300).contains(&status) || text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).map_err(|e| {
                DispatchError::Serialization(format!("解析响应体失败: {e}"))
            })?)
        };

        debug!(
            "远端调用完成: {:?} {}, status={}, 耗时={}ms",
            self.method,
            self.url,
            status,
            started.elapsed().as_millis()
        );

        Ok(RemoteResponse::new(status, body))
    }
}

/// 用查询参数填充路径模板中的 `{param}` 片段
///
/// 被消费的参数从查询串中移除；缺参或模板不闭合返回
/// `InvalidParams`。
pub(crate) fn fill_path(
    template: &str,
    queries: &mut HashMap<String, String>,
) -> DispatchResult<String> {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let after_brace = &rest[start..];
        let end = after_brace.find('}').ok_or_else(|| {
            DispatchError::InvalidParams(format!("路径模板缺少闭合括号: {template}"))
        })?;
        let name = &after_brace[1..end];
        let value = queries.remove(name).ok_or_else(|| {
            DispatchError::InvalidParams(format!("缺少路径参数 {name}: {template}"))
        })?;
        filled.push_str(&value);
        rest = &after_brace[end + 1..];
    }
    filled.push_str(rest);

    Ok(filled)
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceRegistry;

    fn handle_with(registry: ServiceRegistry) -> HttpClientHandle {
        HttpClientHandle::new(
            reqwest::Client::new(),
            "http://api.example.com".to_string(),
            Arc::new(registry),
        )
    }

    #[test]
    fn test_fill_path_substitutes_and_consumes_params() {
        let mut queries = HashMap::new();
        queries.insert("id".to_string(), "42".to_string());
        queries.insert("page".to_string(), "1".to_string());

        let path = fill_path("/users/{id}/orders", &mut queries).unwrap();

        assert_eq!(path, "/users/42/orders");
        // 被路径消费的参数不再出现在查询串里
        assert!(!queries.contains_key("id"));
        assert_eq!(queries.get("page").unwrap(), "1");
    }

    #[test]
    fn test_fill_path_multiple_params() {
        let mut queries = HashMap::new();
        queries.insert("city".to_string(), "beijing".to_string());
        queries.insert("day".to_string(), "3".to_string());

        let path = fill_path("/weather/{city}/forecast/{day}", &mut queries).unwrap();
        assert_eq!(path, "/weather/beijing/forecast/3");
        assert!(queries.is_empty());
    }

    #[test]
    fn test_fill_path_without_placeholders_is_untouched() {
        let mut queries = HashMap::new();
        queries.insert("q".to_string(), "rust".to_string());

        let path = fill_path("/search", &mut queries).unwrap();
        assert_eq!(path, "/search");
        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn test_fill_path_missing_param_fails() {
        let mut queries = HashMap::new();
        let err = fill_path("/users/{id}", &mut queries).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[test]
    fn test_fill_path_unclosed_brace_fails() {
        let mut queries = HashMap::new();
        queries.insert("id".to_string(), "42".to_string());
        let err = fill_path("/users/{id", &mut queries).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }

    #[test]
    fn test_join_url_slash_handling() {
        assert_eq!(
            join_url("http://a.com/", "/users"),
            "http://a.com/users"
        );
        assert_eq!(join_url("http://a.com", "users"), "http://a.com/users");
    }

    #[test]
    fn test_bind_unknown_service_fails() {
        let handle = handle_with(ServiceRegistry::builder().get("svc", "op", "/op").build());
        let err = handle.bind("missing").err().unwrap();
        assert!(matches!(err, DispatchError::ServiceNotFound { .. }));
    }

    #[test]
    fn test_bind_exposes_operations_in_declaration_order() {
        let handle = handle_with(
            ServiceRegistry::builder()
                .get("svc", "first", "/first")
                .post("svc", "second", "/second")
                .build(),
        );

        let proxy = handle.bind("svc").unwrap();
        assert_eq!(proxy.service(), "svc");
        let names: Vec<&str> = proxy.operations().iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_prepare_rejects_missing_path_param() {
        let handle = handle_with(
            ServiceRegistry::builder()
                .get("svc", "getUser", "/users/{id}")
                .build(),
        );

        let proxy = handle.bind("svc").unwrap();
        let err = proxy.operations()[0]
            .prepare(CallRequest::new())
            .err()
            .unwrap();
        assert!(matches!(err, DispatchError::InvalidParams(_)));
    }
}
