//! Storage layer: the in-memory review list shared by the whole application.

mod error;
pub use error::StoreError;

mod memory;
pub use memory::ReviewStore;
