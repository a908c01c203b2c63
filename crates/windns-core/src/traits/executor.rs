// # Command Executor Trait
//
// Defines the interface for running a rendered PowerShell command on the
// remote DNS server.
//
// ## Implementations
//
// - PowerShell remoting (WinRM or SSH): `windns-powershell` crate
// - Tests: recording fakes in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use windns_core::{CommandExecutor, ConnectionProfile};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let executor = /* CommandExecutor implementation */;
//     let profile = ConnectionProfile::new("admin", "secret", "dns01.contoso.com");
//
//     let output = executor
//         .execute("Get-DnsServerZone -Name contoso.com", &profile)
//         .await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::config::{ConnectionProfile, ExecutorConfig};

/// Trait for command executor implementations
///
/// An executor takes one command string and one connection profile, performs
/// exactly one remote round-trip and reports the output or the failure.
///
/// Executors own the transport (process spawning, sessions, authentication)
/// and nothing else. They must not:
/// - retry or back off
/// - interpret the command or its output
/// - classify failures beyond "it failed"
///
/// The lifecycle adapter relies on the failure text reaching it unchanged,
/// because a missing record is recognised by the `ObjectNotFound` marker in
/// that text.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` on the server described by `profile`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: Standard output of the command
    /// - `Err(Error::Execution)`: The command or the transport failed; the
    ///   message carries the remote error text
    async fn execute(
        &self,
        command: &str,
        profile: &ConnectionProfile,
    ) -> Result<String, crate::Error>;

    /// Get the executor name (for logging/debugging)
    fn executor_name(&self) -> &'static str;
}

/// Helper trait for constructing executors from configuration
pub trait CommandExecutorFactory: Send + Sync {
    /// Create a CommandExecutor instance from configuration
    fn create(&self, config: &ExecutorConfig) -> Result<Box<dyn CommandExecutor>, crate::Error>;
}
