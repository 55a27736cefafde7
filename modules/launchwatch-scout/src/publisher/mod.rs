pub mod format;
mod noop;
mod telegram;

pub use noop::NoopPublisher;
pub use telegram::TelegramPublisher;
