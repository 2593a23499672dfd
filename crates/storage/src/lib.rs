#![forbid(unsafe_code)]

pub mod http;
pub mod memory;
pub mod repository;

pub use http::{ApiConfig, DEFAULT_API_URL, HttpInitError, HttpRepository};
pub use memory::InMemoryRepository;
pub use repository::{Storage, StorageError};
