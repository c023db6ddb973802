//! Logging setup.
//!
//! The crate itself only emits through the `log` facade. [`init_logging`] is a
//! convenience for hosts that want a ready `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
