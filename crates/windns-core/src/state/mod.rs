// # State Store Implementations
//
// Host-side storage for resource data, used by the command line driver.

pub mod file;
pub mod memory;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;
