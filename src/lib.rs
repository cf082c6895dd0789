//! courier — 基于命令字的HTTP请求分发层
//!
//! 调用方用 `"service#method"` 形式的命令字发起远端调用：核心
//! 解析命令字、懒解析并缓存（服务代理，操作）绑定、在共享的
//! 后台运行时执行调用，并把结果恰好一次地投递到指定的回调上下
//! 文，调用边界前后支持before/after钩子。
//!
//! 本crate是门面，按层重导出工作区内部crates：
//! - `courier-core`: 数据模型、错误、协作方接口
//! - `courier-client`: 服务注册表与reqwest客户端工厂
//! - `courier-dispatcher`: 解析缓存、分发器与回调上下文

pub use courier_client::{
    HttpClientConfig, HttpClientFactory, HttpClientHandle, HttpMethod, OperationSpec,
    ServiceRegistry, ServiceRegistryBuilder, ServiceSpec,
};
pub use courier_core::{
    CallRequest, CallbackContext, ClientFactory, ClientHandle, Command, DeliveryTask,
    DispatchError, DispatchResult, Operation, Outcome, RemoteCall, RemoteResponse, ServiceProxy,
};
pub use courier_dispatcher::{
    callback_channel, CallbackReceiver, CommandResolver, DispatchHandle, Dispatcher, Hook, Hooks,
    InlineCallbackContext, QueuedCallbackContext, ResolvedBinding,
};
