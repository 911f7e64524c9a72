pub mod dispatcher;
pub mod email;
pub mod telegram;

pub use dispatcher::{DispatchResult, Dispatcher};
pub use email::EmailNotifier;
pub use telegram::TelegramNotifier;
