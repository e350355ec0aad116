//! The state store: the directory of sentinel files shared by the controller,
//! the relay and the dashboard, and the typed primitives over it.

pub mod error;
pub mod event_log;
pub mod file;
pub mod memory;
pub mod status;
pub mod traits;

pub use error::PersistenceError;
pub use event_log::{EVENT_LOG_CAPACITY, EventLog};
pub use file::FileStateStore;
pub use memory::InMemoryStateStore;
pub use status::StatusRepository;
pub use traits::{StateKey, StateStore};
