//! 客户端协作方接口定义
//!
//! 此模块定义了分发核心对传输侧的全部依赖，包括：
//! - 客户端工厂与客户端句柄
//! - 服务代理与操作
//! - 远端调用句柄
//!
//! ## 核心概念
//!
//! ### ClientFactory / ClientHandle
//! 工厂产出配置完毕、可直接发起传输的客户端句柄；除
//! `create_client` 之外核心不对工厂做任何假设。句柄按服务标识
//! 绑定出服务代理，绑定失败（标识无法映射到已注册的服务）返回
//! `ServiceNotFound`。
//!
//! ### ServiceProxy / Operation
//! 代理按声明顺序暴露其全部操作，操作按名字可检索。解析器选取
//! 第一个名字相等的操作，不按参数形态区分同名操作。
//!
//! ### RemoteCall
//! 两段式调用：`Operation::prepare` 产出一次性的调用句柄，
//! `execute` 真正发起请求并等待完成。传输层错误在 `execute`
//! 中以 `Transport` 错误抛出。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    models::{CallRequest, RemoteResponse},
    DispatchResult,
};

/// 客户端工厂
///
/// 对核心而言完全不透明，仅有产出客户端句柄这一项能力。
pub trait ClientFactory: Send + Sync {
    /// 创建配置完毕的客户端句柄
    fn create_client(&self) -> DispatchResult<Arc<dyn ClientHandle>>;
}

/// 客户端句柄
pub trait ClientHandle: Send + Sync {
    /// 按服务标识绑定服务代理
    fn bind(&self, service: &str) -> DispatchResult<Arc<dyn ServiceProxy>>;
}

/// 服务代理
///
/// 操作列表保持声明顺序，供解析器按名字做首个匹配。
pub trait ServiceProxy: Send + Sync {
    /// 所属服务标识
    fn service(&self) -> &str;

    /// 声明顺序的操作列表
    fn operations(&self) -> &[Arc<dyn Operation>];
}

/// 可调用的服务操作
pub trait Operation: Send + Sync {
    /// 操作名
    fn name(&self) -> &str;

    /// 用请求参数构造一次性的远端调用句柄
    fn prepare(&self, request: CallRequest) -> DispatchResult<Box<dyn RemoteCall>>;
}

/// 远端调用句柄
///
/// 一次性消费；没有超时之外的取消机制，调用要么完成要么失败。
#[async_trait]
pub trait RemoteCall: Send {
    /// 发起调用并等待完成
    async fn execute(self: Box<Self>) -> DispatchResult<RemoteResponse>;
}
