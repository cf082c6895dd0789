pub mod delivery;
pub mod dispatcher;
pub mod resolver;

pub use delivery::{callback_channel, CallbackReceiver, InlineCallbackContext, QueuedCallbackContext};
pub use dispatcher::{DispatchHandle, Dispatcher, Hook, Hooks};
pub use resolver::{CommandResolver, ResolvedBinding};
