use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 一次远端调用的入参
///
/// 查询参数以键值对传递；`body` 对分发层完全不透明，
/// 原样透传给解析出的操作。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallRequest {
    /// 查询参数
    pub queries: HashMap<String, String>,
    /// 请求体（POST时使用）
    pub body: Option<Value>,
}

impl CallRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queries(mut self, queries: HashMap<String, String>) -> Self {
        self.queries = queries;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// 远端调用的响应
///
/// 非成功状态码以及空载荷的 `body` 均为 `None`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteResponse {
    status: u16,
    body: Option<Value>,
}

impl RemoteResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// HTTP状态码
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<Value> {
        self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_request_builders() {
        let mut queries = HashMap::new();
        queries.insert("id".to_string(), "42".to_string());

        let request = CallRequest::new()
            .with_queries(queries)
            .with_body(json!({"sku": "X"}));

        assert_eq!(request.queries.get("id").unwrap(), "42");
        assert_eq!(request.body.unwrap(), json!({"sku": "X"}));
    }

    #[test]
    fn test_remote_response_body_access() {
        let response = RemoteResponse::new(200, Some(json!({"ok": true})));
        assert!(response.is_success());
        assert_eq!(response.body().unwrap(), &json!({"ok": true}));
        assert_eq!(response.into_body().unwrap(), json!({"ok": true}));

        let empty = RemoteResponse::new(204, None);
        assert!(empty.is_success());
        assert!(empty.body().is_none());

        let failed = RemoteResponse::new(500, None);
        assert!(!failed.is_success());
    }
}
