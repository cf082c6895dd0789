pub mod callback;
pub mod client;

pub use callback::{CallbackContext, DeliveryTask};
pub use client::{ClientFactory, ClientHandle, Operation, RemoteCall, ServiceProxy};
