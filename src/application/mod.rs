//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it owns the filter and disclosure stores, issues refreshes, and applies
//! their results.

pub mod controller;
pub mod state;
pub mod store;

pub use controller::*;
pub use state::*;
pub use store::*;
