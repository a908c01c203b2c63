// # PowerShell Remoting Executor
//
// This crate runs provider commands on the DNS server through a local
// PowerShell that opens a remote session.
//
// ## Transports
//
// - WinRM (default): credentials are wrapped in a `PSCredential`;
//   `use_ssl` adds `-UseSSL`
// - SSH (`use_ssh`): `New-PSSession -HostName ... -SSHTransport`, key based
//
// ## Failure Reporting
//
// A command counts as failed when the shell exits non-zero or writes
// anything to stderr. The stderr text is returned as the error message
// without modification; the lifecycle adapter looks for `ObjectNotFound` in
// it.
//
// ## Security Requirements
//
// - The password NEVER appears in logs or Debug output
// - Only the inner record command is logged, never the session script

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use windns_core::config::{ConnectionProfile, ExecutorConfig};
use windns_core::registry::ExecutorRegistry;
use windns_core::traits::{CommandExecutor, CommandExecutorFactory};
use windns_core::{Error, Result};

/// Platform default PowerShell executable
pub fn default_shell() -> &'static str {
    if cfg!(windows) { "powershell.exe" } else { "pwsh" }
}

/// Quote a value as a PowerShell single-quoted string literal
fn ps_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Wrap `command` in a script that runs it inside a remote session.
///
/// The command itself is inserted untouched into the script block.
pub fn remoting_script(command: &str, profile: &ConnectionProfile) -> String {
    let open_session = if profile.use_ssh {
        format!(
            "$s = New-PSSession -HostName {} -UserName {} -SSHTransport",
            profile.server, profile.username
        )
    } else {
        format!(
            "$SecurePassword = {} | ConvertTo-SecureString -AsPlainText -Force; \
             $cred = New-Object System.Management.Automation.PSCredential -ArgumentList {}, $SecurePassword; \
             $s = New-PSSession -ComputerName {} -Credential $cred{}",
            ps_literal(&profile.password),
            ps_literal(&profile.username),
            profile.server,
            if profile.use_ssl { " -UseSSL" } else { "" }
        )
    };

    format!(
        "{}; Invoke-Command -Session $s -Scriptblock {{ {} }}; Remove-PSSession $s",
        open_session, command
    )
}

/// Command executor backed by PowerShell remoting
///
/// # Dry-Run Mode
///
/// When `dry_run` is true the executor logs the command it would run and
/// returns empty output without starting a process.
#[derive(Debug, Clone)]
pub struct PowerShellExecutor {
    shell: String,
    timeout: Option<Duration>,
    dry_run: bool,
}

impl PowerShellExecutor {
    /// Create a new executor
    ///
    /// # Parameters
    ///
    /// - `shell`: PowerShell executable; platform default when `None`
    /// - `timeout`: Kill the command after this long; no limit when `None`
    /// - `dry_run`: Log commands instead of running them
    pub fn new(shell: Option<String>, timeout: Option<Duration>, dry_run: bool) -> Self {
        Self {
            shell: shell.unwrap_or_else(|| default_shell().to_string()),
            timeout,
            dry_run,
        }
    }

    /// Create an executor that runs commands with the default shell
    pub fn new_live() -> Self {
        Self::new(None, None, false)
    }

    /// Create an executor that only logs commands
    pub fn new_dry_run() -> Self {
        Self::new(None, None, true)
    }

    /// The PowerShell executable in use
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Whether commands are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn run_script(&self, script: &str) -> Result<std::process::Output> {
        let mut cmd = Command::new(&self.shell);
        cmd.args(["-NoProfile", "-NonInteractive", "-Command", script])
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = cmd.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output).await.map_err(|_| {
                Error::execution(format!("PowerShell command timed out after {:?}", limit))
            })?,
            None => output.await,
        };

        output.map_err(|e| Error::execution(format!("Failed to start {}: {}", self.shell, e)))
    }
}

impl Default for PowerShellExecutor {
    fn default() -> Self {
        Self::new_live()
    }
}

#[async_trait]
impl CommandExecutor for PowerShellExecutor {
    async fn execute(&self, command: &str, profile: &ConnectionProfile) -> Result<String> {
        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would run on {}: {}",
                profile.server,
                command
            );
            return Ok(String::new());
        }

        tracing::debug!(server = %profile.server, ssh = profile.use_ssh, "Opening PowerShell session");

        let script = remoting_script(command, profile);
        let output = self.run_script(&script).await?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() || !stderr.is_empty() {
            let message = if stderr.is_empty() {
                format!("PowerShell exited with {}", output.status)
            } else {
                stderr
            };
            tracing::debug!(server = %profile.server, "PowerShell command failed");
            return Err(Error::execution(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn executor_name(&self) -> &'static str {
        "powershell"
    }
}

/// Factory for creating PowerShell executors
pub struct PowerShellFactory;

impl CommandExecutorFactory for PowerShellFactory {
    fn create(&self, config: &ExecutorConfig) -> Result<Box<dyn CommandExecutor>> {
        match config {
            ExecutorConfig::Powershell {
                shell,
                timeout_secs,
                dry_run,
            } => {
                config.validate()?;

                if *dry_run {
                    tracing::warn!(
                        "PowerShell executor running in DRY-RUN mode - no changes will be made"
                    );
                }

                Ok(Box::new(PowerShellExecutor::new(
                    shell.clone(),
                    timeout_secs.map(Duration::from_secs),
                    *dry_run,
                )))
            }
            _ => Err(Error::config("Invalid config for PowerShell executor")),
        }
    }
}

/// Register the PowerShell executor with a registry
///
/// # Example
///
/// ```rust
/// use windns_core::ExecutorRegistry;
///
/// let registry = ExecutorRegistry::new();
/// windns_powershell::register(&registry);
/// assert!(registry.has_executor("powershell"));
/// ```
pub fn register(registry: &ExecutorRegistry) {
    registry.register_executor("powershell", Box::new(PowerShellFactory));
}
