//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP question service, configuration loading,
//! and logging setup.

pub mod config;
pub mod http;
pub mod logging;

pub use config::*;
pub use http::*;
pub use logging::*;
