pub mod call;
pub mod command;
pub mod outcome;

pub use call::{CallRequest, RemoteResponse};
pub use command::Command;
pub use outcome::Outcome;
