pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod repositories;

pub use error::*;
pub use file_store::*;
pub use memory_store::*;
pub use repositories::*;
