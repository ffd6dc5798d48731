pub mod models;
pub mod services;
pub mod schema;
pub mod errors;

pub use models::*;
pub use services::*;
pub use schema::*;
pub use errors::*;
