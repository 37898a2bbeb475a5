// Adapters: boundaries to the file system and the database.

pub mod csv_export;
pub mod database;
pub mod storage;

pub use crate::adapters::database::Database;
pub use crate::adapters::storage::JsonStore;
