/// 投递到回调上下文的闭包
pub type DeliveryTask = Box<dyn FnOnce() + Send + 'static>;

/// 回调执行上下文
///
/// 结果投递的可注入缝隙：每次分发的结果在此上下文中恰好投递
/// 一次。实现可以就地执行（测试用），也可以排队到指定线程消费。
pub trait CallbackContext: Send + Sync {
    /// 投递一个回调任务
    fn deliver(&self, task: DeliveryTask);
}
