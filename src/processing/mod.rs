// src/processing/mod.rs
pub mod encoding;
pub mod error;
pub mod indices;
pub mod parallel;
pub mod summary;

// Re-export main components
pub use encoding::OutputEncoding;
pub use error::CalcError;
pub use parallel::ParallelProcessor;
