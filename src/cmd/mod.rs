//! Subcommands of the `guardian` binary.

pub mod dashboard;
pub mod relay;

pub use dashboard::DashboardArgs;
pub use relay::RelayArgs;
use thiserror::Error;

use crate::{context::AppContextError, supervisor::SupervisorError};

/// Errors that stop a subcommand from starting or running.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error("Initialization error: {0}")]
    Context(#[from] AppContextError),

    /// Services could not be wired or failed at runtime.
    #[error("Supervisor error: {0}")]
    Supervisor(#[from] SupervisorError),
}
