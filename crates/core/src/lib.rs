pub mod errors;
pub mod models;
pub mod traits;

pub use errors::*;
pub use models::{CallRequest, Command, Outcome, RemoteResponse};
pub use traits::{
    CallbackContext, ClientFactory, ClientHandle, DeliveryTask, Operation, RemoteCall,
    ServiceProxy,
};

/// 统一的Result类型
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
