//! prephub - Interview Prep Question Browser
//!
//! A terminal client that lists interview questions from a remote API,
//! filters them by category, sub-category and difficulty, and reveals
//! answers on demand.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::*;
pub use application::*;
