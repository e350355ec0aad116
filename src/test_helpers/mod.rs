//! A set of helpers for testing

mod alarm;
mod alert;
mod channel;
mod store;

pub use alarm::AlarmStatusBuilder;
pub use alert::AlertBuilder;
pub use channel::{RecordingChannel, SentMessage};
pub use store::create_test_file_store;
