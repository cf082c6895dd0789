//! 请求分发器
//!
//! 编排单次请求的完整生命周期：解析命令字、执行before钩子、
//! 经缓存解析绑定、发起远端调用、按规则执行after钩子，最后把
//! 结果投递到回调上下文，成功失败都恰好投递一次。
//!
//! 解析+调用流水线在共享的tokio运行时上执行；`before` 在调用方
//! 线程同步执行，可能阻塞调用方。派发后请求只会运行到完成或
//! 失败，核心不提供超时与取消策略。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use courier_core::{
    CallRequest, CallbackContext, ClientFactory, Command, DispatchError, DispatchResult, Outcome,
    RemoteResponse,
};

use crate::resolver::CommandResolver;

/// 围绕调用边界的副作用钩子
pub type Hook = Box<dyn FnOnce() + Send + 'static>;

/// before/after钩子对，默认均为空操作
pub struct Hooks {
    /// 调度任何异步工作之前，在调用方线程同步执行
    pub before: Hook,
    /// 远端调用成功返回后、结果投递之前执行
    pub after: Hook,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            before: Box::new(|| {}),
            after: Box::new(|| {}),
        }
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_before(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.before = Box::new(hook);
        self
    }

    pub fn with_after(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.after = Box::new(hook);
        self
    }
}

/// 已派发请求的句柄
///
/// 包装后台流水线的 `JoinHandle`。分发层不在其上构建取消策略。
pub struct DispatchHandle {
    inner: JoinHandle<()>,
}

impl DispatchHandle {
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// 等待后台流水线结束（含结果投递）
    pub async fn wait(self) {
        let _ = self.inner.await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Get,
    Post,
}

/// 请求分发器
///
/// 持有客户端工厂、解析缓存与回调上下文，三者都经 `Arc` 共享，
/// 多处分发点可克隆使用同一份缓存。
pub struct Dispatcher {
    factory: Arc<dyn ClientFactory>,
    resolver: Arc<CommandResolver>,
    callback_ctx: Arc<dyn CallbackContext>,
}

impl Dispatcher {
    pub fn new(factory: Arc<dyn ClientFactory>, callback_ctx: Arc<dyn CallbackContext>) -> Self {
        Self::with_resolver(factory, Arc::new(CommandResolver::new()), callback_ctx)
    }

    pub fn with_resolver(
        factory: Arc<dyn ClientFactory>,
        resolver: Arc<CommandResolver>,
        callback_ctx: Arc<dyn CallbackContext>,
    ) -> Self {
        Self {
            factory,
            resolver,
            callback_ctx,
        }
    }

    pub fn resolver(&self) -> &Arc<CommandResolver> {
        &self.resolver
    }

    /// GET风格请求
    ///
    /// 命令字不合法时整个请求被静默跳过：不执行钩子、不触达协作
    /// 方、不投递回调，返回 `None`。
    pub fn get<T, F>(
        &self,
        command: &str,
        queries: HashMap<String, String>,
        callback: F,
        hooks: Hooks,
    ) -> Option<DispatchHandle>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let request = CallRequest::new().with_queries(queries);
        self.dispatch(CallKind::Get, command, request, callback, hooks)
    }

    /// POST风格请求
    ///
    /// 请求体对分发层不透明，原样透传给解析出的操作。与GET的差别
    /// 在于after钩子的触发条件：调用成功返回后即执行，与响应体是
    /// 否存在无关。
    pub fn post<T, F>(
        &self,
        command: &str,
        queries: HashMap<String, String>,
        body: Value,
        callback: F,
        hooks: Hooks,
    ) -> Option<DispatchHandle>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        let request = CallRequest::new().with_queries(queries).with_body(body);
        self.dispatch(CallKind::Post, command, request, callback, hooks)
    }

    fn dispatch<T, F>(
        &self,
        kind: CallKind,
        command: &str,
        request: CallRequest,
        callback: F,
        hooks: Hooks,
    ) -> Option<DispatchHandle>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Outcome<T>) + Send + 'static,
    {
        // 不合法的命令字静默跳过
        let command = Command::parse(command).ok()?;

        let Hooks { before, after } = hooks;
        before();

        let factory = self.factory.clone();
        let resolver = self.resolver.clone();
        let callback_ctx = self.callback_ctx.clone();

        let inner = tokio::spawn(async move {
            let outcome = run_call::<T>(kind, factory, resolver, &command, request, after).await;
            callback_ctx.deliver(Box::new(move || callback(outcome)));
        });

        Some(DispatchHandle { inner })
    }
}

/// 执行解析+调用流水线，按kind对应的规则触发after钩子
async fn run_call<T: DeserializeOwned>(
    kind: CallKind,
    factory: Arc<dyn ClientFactory>,
    resolver: Arc<CommandResolver>,
    command: &Command,
    request: CallRequest,
    after: Hook,
) -> Outcome<T> {
    let started = Instant::now();
    debug!("开始执行请求: command={}, kind={:?}", command, kind);

    let result: DispatchResult<RemoteResponse> = async {
        let client = factory.create_client()?;
        let binding = resolver.resolve(command, &client).await?;
        let call = binding.operation().prepare(request)?;
        call.execute().await
    }
    .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            warn!("请求执行失败: command={}, error={}", command, e);
            return Outcome::error(e);
        }
    };

    debug!(
        "远端调用返回: command={}, status={}, 耗时={}ms",
        command,
        response.status(),
        started.elapsed().as_millis()
    );

    match kind {
        // GET只在响应体存在且成功解码时触发after
        CallKind::Get => match response.into_body() {
            None => Outcome::empty(),
            Some(body) => match serde_json::from_value::<T>(body) {
                Ok(value) => {
                    after();
                    Outcome::value(value)
                }
                Err(e) => Outcome::error(DispatchError::Serialization(e.to_string())),
            },
        },
        // POST在调用成功返回后即触发after
        CallKind::Post => {
            after();
            match response.into_body() {
                None => Outcome::empty(),
                Some(body) => match serde_json::from_value::<T>(body) {
                    Ok(value) => Outcome::value(value),
                    Err(e) => Outcome::error(DispatchError::Serialization(e.to_string())),
                },
            }
        }
    }
}
