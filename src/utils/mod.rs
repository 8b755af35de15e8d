//! The `utils` module collects the pieces shared by every other module of the
//! relay: the crate error type and the logging bootstrap.

pub mod error;
pub mod logging;

pub use error::RelayError;
