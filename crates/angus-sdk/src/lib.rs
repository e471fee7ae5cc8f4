mod macros;

pub mod api;
pub mod common;
pub mod config;
pub mod error;
pub mod telemetry;

pub use error::{SdkError, SdkErrorKind, SdkResult};
