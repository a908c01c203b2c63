//! Configuration types for the WinDNS provider
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Main provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// How to reach the DNS server
    pub connection: ConnectionProfile,

    /// Which executor runs the rendered commands
    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl ProviderConfig {
    /// Create a configuration with the default executor
    pub fn new(connection: ConnectionProfile) -> Self {
        Self {
            connection,
            executor: ExecutorConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.connection.validate()?;
        self.executor.validate()?;
        Ok(())
    }
}

/// Credentials and transport flags for the remote DNS server
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Account used to open the remote session
    pub username: String,

    /// Password for `username`
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub password: String,

    /// DNS server host name or address
    pub server: String,

    /// Use WinRM over HTTPS
    #[serde(default)]
    pub use_ssl: bool,

    /// Use PowerShell remoting over SSH instead of WinRM
    #[serde(default)]
    pub use_ssh: bool,
}

impl std::fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("server", &self.server)
            .field("use_ssl", &self.use_ssl)
            .field("use_ssh", &self.use_ssh)
            .finish()
    }
}

impl ConnectionProfile {
    /// Create a WinRM profile without SSL
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            server: server.into(),
            use_ssl: false,
            use_ssh: false,
        }
    }

    /// Enable or disable WinRM over HTTPS
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Enable or disable the SSH transport
    pub fn with_ssh(mut self, use_ssh: bool) -> Self {
        self.use_ssh = use_ssh;
        self
    }

    /// Validate the connection profile
    ///
    /// SSH sessions authenticate with keys, so only WinRM needs a password.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.server.is_empty() {
            return Err(crate::Error::config("DNS server address cannot be empty"));
        }
        if self.username.is_empty() {
            return Err(crate::Error::config("Username cannot be empty"));
        }
        if self.password.is_empty() && !self.use_ssh {
            return Err(crate::Error::config(
                "Password cannot be empty when using the WinRM transport",
            ));
        }
        Ok(())
    }
}

/// Executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutorConfig {
    /// Run commands through a local PowerShell with remoting
    Powershell {
        /// Shell executable; platform default when unset
        #[serde(default)]
        shell: Option<String>,
        /// Give up on a command after this many seconds; no limit when unset
        #[serde(default)]
        timeout_secs: Option<u64>,
        /// Log commands instead of running them
        #[serde(default)]
        dry_run: bool,
    },

    /// Custom executor
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ExecutorConfig {
    /// Validate the executor configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ExecutorConfig::Powershell {
                shell,
                timeout_secs,
                ..
            } => {
                if shell.as_deref().is_some_and(str::is_empty) {
                    return Err(crate::Error::config("PowerShell executable cannot be empty"));
                }
                if *timeout_secs == Some(0) {
                    return Err(crate::Error::config("Executor timeout must be > 0"));
                }
                Ok(())
            }
            ExecutorConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom executor factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom executor config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the executor type name
    pub fn type_name(&self) -> &str {
        match self {
            ExecutorConfig::Powershell { .. } => "powershell",
            ExecutorConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig::Powershell {
            shell: None,
            timeout_secs: None,
            dry_run: false,
        }
    }
}
