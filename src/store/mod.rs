// Re-export the store interface and its implementations
mod types;
mod memory;
pub mod seed;

// Public exports from the store module
pub use types::*;
pub use memory::MemoryTripStore;
