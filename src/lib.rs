#![warn(missing_docs)]
//! Guardian coordinates an on-premises security controller, a chat
//! notification relay and a local dashboard through a directory of shared
//! state files.

pub mod cmd;
pub mod config;
pub mod context;
pub mod http_server;
pub mod models;
pub mod persistence;
pub mod relay;
pub mod supervisor;
pub mod test_helpers;
