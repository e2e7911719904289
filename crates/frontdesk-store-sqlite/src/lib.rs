//! SQLite backend for the Frontdesk check-in service.
//!
//! One engine, one schema, three store traits — there are deliberately no
//! parallel persistence bindings. Wraps [`tokio_rusqlite`] so all database
//! access runs on a dedicated thread pool without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
