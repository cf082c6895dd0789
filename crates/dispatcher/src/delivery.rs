//! 回调上下文实现
//!
//! `CallbackContext` 是结果投递的可注入缝隙，这里提供两个实现：
//! 就地执行的 `InlineCallbackContext`（测试与嵌入场景），以及把
//! 回调排队到指定消费线程的 `QueuedCallbackContext`（对应惯例中
//! 的"主线程回调"）。

use tokio::sync::mpsc;
use tracing::warn;

use courier_core::{CallbackContext, DeliveryTask};

/// 就地执行回调的上下文
///
/// 回调直接在投递方（后台流水线）上执行。
pub struct InlineCallbackContext;

impl CallbackContext for InlineCallbackContext {
    fn deliver(&self, task: DeliveryTask) {
        task();
    }
}

/// 创建一对排队回调上下文与消费端
pub fn callback_channel() -> (QueuedCallbackContext, CallbackReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueuedCallbackContext { tx }, CallbackReceiver { rx })
}

/// 排队投递的回调上下文
///
/// 投递端无界排队，由持有 `CallbackReceiver` 的一侧（应用指定的
/// 回调线程）消费执行，投递顺序即执行顺序。
#[derive(Clone)]
pub struct QueuedCallbackContext {
    tx: mpsc::UnboundedSender<DeliveryTask>,
}

impl CallbackContext for QueuedCallbackContext {
    fn deliver(&self, task: DeliveryTask) {
        if self.tx.send(task).is_err() {
            warn!("回调上下文已关闭，本次投递被丢弃");
        }
    }
}

/// 排队回调的消费端
pub struct CallbackReceiver {
    rx: mpsc::UnboundedReceiver<DeliveryTask>,
}

impl CallbackReceiver {
    /// 接收并执行下一个回调；所有投递端关闭后返回 `false`
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// 非阻塞地执行当前已排队的全部回调，返回执行数量
    pub fn drain(&mut self) -> usize {
        let mut executed = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            executed += 1;
        }
        executed
    }

    /// 循环消费，直到所有投递端关闭
    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}
