pub mod column;
pub mod database;
pub mod declaration;
pub mod error;
pub mod executor;
pub mod orm;
pub mod registry;
pub mod schema;
pub mod types;

// Re-export them for easier access from the crate root
pub use column::*;
pub use database::*;
pub use declaration::*;
pub use error::*;
pub use executor::*;
pub use orm::*;
pub use registry::*;
pub use schema::*;
pub use types::*;
