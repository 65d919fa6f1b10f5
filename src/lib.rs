//! Compile annotated Rust structs into `CREATE TABLE IF NOT EXISTS`
//! statements for MySQL and run them through an [`Executor`].
//!
//! ```ignore
//! use tablecraft::*;
//!
//! #[entity(table_name = "users")]
//! pub struct User {
//!     #[id]
//!     #[column(ty = "int")]
//!     pub id: i64,
//!     #[column(ty = "string", length = 100, unique)]
//!     pub email: String,
//! }
//!
//! let orm = Orm::new(Database::connect(config).await?);
//! orm.create_table::<User>().await?;
//! ```

// Lets `#[entity]` expansions name `::tablecraft` from inside this crate.
extern crate self as tablecraft;

mod libs;

pub use libs::*;
pub use tablecraft_derive::entity;
