//! Core traits for the WinDNS provider
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`CommandExecutor`]: Run a PowerShell command on the DNS server
//! - [`StateStore`]: Host-side resource state storage

pub mod executor;
pub mod state_store;

pub use executor::{CommandExecutor, CommandExecutorFactory};
pub use state_store::{StateRecord, StateStore};
