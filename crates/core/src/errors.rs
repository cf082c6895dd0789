use thiserror::Error;

/// 分发层错误类型定义
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("命令字格式无效: {command}")]
    MalformedCommand { command: String },

    #[error("服务未注册: {service}")]
    ServiceNotFound { service: String },

    #[error("服务 {service} 中不存在操作: {operation}")]
    OperationNotFound { service: String, operation: String },

    #[error("创建客户端失败: {0}")]
    ClientConstruction(String),

    #[error("请求参数无效: {0}")]
    InvalidParams(String),

    #[error("网络错误: {0}")]
    Transport(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}
