//! 演示：把天气服务声明进注册表，经分发器按命令字发起请求。
//!
//! 运行前先准备一个本地HTTP服务（默认 http://localhost:8080），
//! 或通过COURIER_BASE_URL指向别处。

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;

use courier::{
    callback_channel, Dispatcher, Hooks, HttpClientConfig, HttpClientFactory, ServiceRegistry,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("courier=debug,info")),
        )
        .init();

    let registry = ServiceRegistry::builder()
        .get("city.WeatherService", "today", "/weather/{city}")
        .post("city.WeatherService", "report", "/weather/{city}/report")
        .build();

    let mut config = HttpClientConfig::default();
    if let Ok(base_url) = std::env::var("COURIER_BASE_URL") {
        config.base_url = base_url;
    }
    config.validate()?;

    let (callback_ctx, mut receiver) = callback_channel();
    let factory = Arc::new(HttpClientFactory::new(config, registry));
    let dispatcher = Dispatcher::new(factory, Arc::new(callback_ctx));

    let mut queries = HashMap::new();
    queries.insert("city".to_string(), "beijing".to_string());

    let hooks = Hooks::new()
        .with_before(|| info!("开始查询今日天气"))
        .with_after(|| info!("天气查询已返回"));

    let get_handle = dispatcher.get::<Value, _>(
        "city.WeatherService#today",
        queries,
        |outcome| match outcome.into_result() {
            Ok(Some(body)) => info!("今日天气: {}", body),
            Ok(None) => info!("今日天气: 响应为空"),
            Err(e) => info!("天气查询失败: {}", e),
        },
        hooks,
    );

    let mut report_queries = HashMap::new();
    report_queries.insert("city".to_string(), "beijing".to_string());

    let post_handle = dispatcher.post::<Value, _>(
        "city.WeatherService#report",
        report_queries,
        json!({"observer": "demo", "condition": "sunny"}),
        |outcome| match outcome.into_result() {
            Ok(_) => info!("天气上报完成"),
            Err(e) => info!("天气上报失败: {}", e),
        },
        Hooks::new(),
    );

    if let Some(handle) = get_handle {
        handle.wait().await;
    }
    if let Some(handle) = post_handle {
        handle.wait().await;
    }

    // 指定的回调侧消费投递
    receiver.drain();
    Ok(())
}
