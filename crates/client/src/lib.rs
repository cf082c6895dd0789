pub mod config;
pub mod factory;
pub mod proxy;
pub mod registry;

pub use config::HttpClientConfig;
pub use factory::HttpClientFactory;
pub use proxy::HttpClientHandle;
pub use registry::{HttpMethod, OperationSpec, ServiceRegistry, ServiceRegistryBuilder, ServiceSpec};
