//! 命令字解析器与绑定缓存
//!
//! 把 `"service#method"` 命令字解析为（服务代理，操作）的绑定对，
//! 以完整命令字字符串为键做进程级缓存。条目首次使用时创建，
//! 进程存活期间不失效、不刷新。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use courier_core::{
    ClientHandle, Command, DispatchError, DispatchResult, Operation, ServiceProxy,
};

/// 一个命令字解析出的绑定对
///
/// 创建后不可变，由缓存独占持有，调用方只经由分发器触达。
#[derive(Clone)]
pub struct ResolvedBinding {
    proxy: Arc<dyn ServiceProxy>,
    operation: Arc<dyn Operation>,
}

impl ResolvedBinding {
    pub fn proxy(&self) -> &Arc<dyn ServiceProxy> {
        &self.proxy
    }

    pub fn operation(&self) -> &Arc<dyn Operation> {
        &self.operation
    }
}

/// 命令字解析缓存
///
/// 显式持有的单实例，经 `Arc` 传递到各分发点。缓存命中时不再
/// 触达客户端；未命中时在写锁内做检查后插入，同一命令字的并发
/// 冷解析只会绑定一次。
///
/// 绑定粘住首次解析所用的客户端：同一命令字换用其他客户端再次
/// 解析，返回的仍是首次的绑定。
pub struct CommandResolver {
    bindings: RwLock<HashMap<String, ResolvedBinding>>,
}

impl CommandResolver {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// 解析命令字，命中缓存时直接返回已有绑定
    pub async fn resolve(
        &self,
        command: &Command,
        client: &Arc<dyn ClientHandle>,
    ) -> DispatchResult<ResolvedBinding> {
        let key = command.to_string();

        {
            let bindings = self.bindings.read().await;
            if let Some(binding) = bindings.get(&key) {
                debug!("命令字缓存命中: {}", key);
                return Ok(binding.clone());
            }
        }

        let mut bindings = self.bindings.write().await;
        // 拿到写锁后复查，避免并发冷解析重复绑定
        if let Some(binding) = bindings.get(&key) {
            debug!("命令字缓存命中: {}", key);
            return Ok(binding.clone());
        }

        let proxy = client.bind(command.service())?;
        let operation = proxy
            .operations()
            .iter()
            .find(|op| op.name() == command.method())
            .cloned()
            .ok_or_else(|| DispatchError::OperationNotFound {
                service: command.service().to_string(),
                operation: command.method().to_string(),
            })?;

        let binding = ResolvedBinding { proxy, operation };
        bindings.insert(key.clone(), binding.clone());
        info!(
            "冷解析完成: command={}, service={}, operation={}",
            key,
            command.service(),
            command.method()
        );

        Ok(binding)
    }

    /// 检查命令字是否已缓存
    pub async fn contains(&self, command: &Command) -> bool {
        let bindings = self.bindings.read().await;
        bindings.contains_key(&command.to_string())
    }

    /// 已缓存的绑定数量
    pub async fn count(&self) -> usize {
        let bindings = self.bindings.read().await;
        bindings.len()
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new()
    }
}
