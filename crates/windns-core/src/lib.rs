// # windns-core
//
// Core library for the Windows DNS record provider.
//
// ## Architecture Overview
//
// - **ResourceData**: Raw resource fields as the host delivers them
// - **DnsRecord**: Validated A / CNAME / PTR record
// - **command**: PowerShell command rendering for add, lookup and remove
// - **WinDnsClient**: The Create / Read / Delete lifecycle adapter
// - **CommandExecutor**: Trait for running a command on the DNS server
// - **ExecutorRegistry**: Plugin-based registry for executors
// - **Driver** / **StateStore**: Host-side state handling for the CLI
//
// ## Design Principles
//
// 1. **Thin adapter**: One command, one round-trip per lifecycle call
// 2. **No retries**: Failures go straight back to the host
// 3. **Explicit context**: Credentials travel in a `ConnectionProfile`
// 4. **Library-First**: All core functionality can be used as a library

pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod record;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use config::{ConnectionProfile, ExecutorConfig, ProviderConfig};
pub use driver::{ApplyOutcome, Driver};
pub use error::{Error, Result};
pub use record::{DnsRecord, RecordData, RecordType};
pub use registry::ExecutorRegistry;
pub use resource::{ResourceData, WinDnsClient};
pub use state::{FileStateStore, MemoryStateStore};
pub use traits::{CommandExecutor, StateStore};
