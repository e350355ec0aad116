//! Schemas for every record persisted in the state store.
//!
//! Defaulting rules live here, at the deserialization boundary, so callers
//! never have to patch up missing fields themselves.

pub mod alarm;
pub mod alert;
pub mod control;
pub mod event;
pub mod unlock;

pub use alarm::AlarmStatus;
pub use alert::{AlertKind, AlertPriority, AlertQueueEntry};
pub use control::{ControlCommand, UnknownControlCommand};
pub use event::{EventClass, EventLogEntry};
pub use unlock::{UnlockMethod, UnlockStatus};
