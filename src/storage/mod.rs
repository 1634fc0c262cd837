pub mod models;
pub mod sqlite_store;

pub use sqlite_store::{IssuedCodeStore, SqliteCodeStore};

#[cfg(test)]
pub use sqlite_store::MockIssuedCodeStore;
