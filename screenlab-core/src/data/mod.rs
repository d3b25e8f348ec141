//! Data provider contract and the providers shipped with the core.

pub mod csv_store;
pub mod memory;
pub mod provider;
pub mod universe;

pub use csv_store::CsvDirectoryProvider;
pub use memory::InMemoryProvider;
pub use provider::{DataError, DataProvider};
pub use universe::Universe;
