// # windns - command line host
//
// A THIN integration layer: it parses configuration, builds the executor
// and hands resource data to windns-core. Record logic lives in windns-core.
//
// ## Configuration
//
// Every option can be given as a flag or an environment variable:
//
// ### Connection
// - `WINDNS_USERNAME`: Account used for the remote session
// - `WINDNS_PASSWORD`: Password (WinRM only)
// - `WINDNS_SERVER`: DNS server host name
// - `WINDNS_USESSL`: `1` to use WinRM over HTTPS
// - `WINDNS_USESSH`: `1` to use PowerShell remoting over SSH
//
// ### Executor
// - `WINDNS_SHELL`: PowerShell executable (default: `pwsh`, `powershell.exe` on Windows)
// - `WINDNS_TIMEOUT_SECS`: Per-command timeout (default: none)
// - `WINDNS_MODE`: `live` (default) or `dry-run`
//
// ### Host
// - `WINDNS_STATE_PATH`: State file for apply / refresh / destroy / list
// - `WINDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export WINDNS_USERNAME='CONTOSO\dnsadmin'
// export WINDNS_PASSWORD=secret
// export WINDNS_SERVER=dns01.contoso.com
//
// windns create --zone-name contoso.com --record-name host03 --record-type A --ipv4address 10.0.0.5
// windns apply web --zone-name contoso.com --record-name www --record-type CNAME --hostnamealias web01
// ```

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use windns_core::{
    ConnectionProfile, Driver, ExecutorConfig, ExecutorRegistry, FileStateStore, ProviderConfig,
    ResourceData, WinDnsClient,
};

/// Exit codes for different termination scenarios
///
/// - 0: Success
/// - 1: Configuration error
/// - 2: Runtime error (lifecycle call failed)
#[derive(Debug, Clone, Copy)]
enum WinDnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<WinDnsExitCode> for ExitCode {
    fn from(code: WinDnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Live,
    DryRun,
}

#[derive(Parser)]
#[command(name = "windns")]
#[command(version)]
#[command(about = "Manage Windows DNS records over PowerShell remoting")]
struct Cli {
    /// Account used for the remote session
    #[arg(long, env = "WINDNS_USERNAME", global = true, default_value = "")]
    username: String,

    /// Password for the account (WinRM only)
    #[arg(
        long,
        env = "WINDNS_PASSWORD",
        global = true,
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    password: String,

    /// DNS server host name or address
    #[arg(long, env = "WINDNS_SERVER", global = true, default_value = "")]
    server: String,

    /// Use WinRM over HTTPS
    #[arg(
        long,
        env = "WINDNS_USESSL",
        global = true,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    use_ssl: bool,

    /// Use PowerShell remoting over SSH
    #[arg(
        long,
        env = "WINDNS_USESSH",
        global = true,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    use_ssh: bool,

    /// PowerShell executable
    #[arg(long, env = "WINDNS_SHELL", global = true)]
    shell: Option<String>,

    /// Per-command timeout in seconds
    #[arg(long, env = "WINDNS_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Run commands or only log them
    #[arg(long, env = "WINDNS_MODE", global = true, value_enum, default_value = "live")]
    mode: Mode,

    /// State file used by apply, refresh, destroy and list
    #[arg(
        long,
        env = "WINDNS_STATE_PATH",
        global = true,
        default_value = "windns-state.json"
    )]
    state_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WINDNS_LOG_LEVEL", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Resource(ResourceCommand),
    /// Print the resource schema as JSON
    Schema,
}

/// Commands that talk to the DNS server
#[derive(Subcommand)]
enum ResourceCommand {
    /// Add a record (provider Create callback)
    Create(RecordArgs),
    /// Look a record up (provider Read callback)
    Read(RecordArgs),
    /// Remove a record (provider Delete callback)
    Delete(RecordArgs),
    /// Create, replace or keep a tracked record
    Apply {
        /// Resource address in the state file
        address: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Re-read a tracked record
    Refresh {
        /// Resource address in the state file
        address: String,
    },
    /// Remove a tracked record and forget it
    Destroy {
        /// Resource address in the state file
        address: String,
    },
    /// List tracked resource addresses
    List,
}

#[derive(Args, Debug, Clone)]
struct RecordArgs {
    /// Zone the record lives in
    #[arg(long)]
    zone_name: String,

    /// Record name inside the zone
    #[arg(long)]
    record_name: String,

    /// A, CNAME or PTR
    #[arg(long)]
    record_type: String,

    /// Address for A and PTR records
    #[arg(long)]
    ipv4address: Option<String>,

    /// Alias target for CNAME records
    #[arg(long)]
    hostnamealias: Option<String>,

    /// Existing resource id
    #[arg(long)]
    id: Option<String>,
}

impl From<RecordArgs> for ResourceData {
    fn from(args: RecordArgs) -> Self {
        ResourceData {
            zone_name: args.zone_name,
            record_name: args.record_name,
            record_type: args.record_type,
            ipv4address: args.ipv4address,
            hostnamealias: args.hostnamealias,
            id: args.id,
        }
    }
}

impl Cli {
    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            connection: ConnectionProfile::new(&self.username, &self.password, &self.server)
                .with_ssl(self.use_ssl)
                .with_ssh(self.use_ssh),
            executor: ExecutorConfig::Powershell {
                shell: self.shell.clone(),
                timeout_secs: self.timeout_secs,
                dry_run: self.mode == Mode::DryRun,
            },
        }
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "WINDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return WinDnsExitCode::ConfigError.into();
        }
    };

    // Logs go to stderr; stdout carries command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return WinDnsExitCode::ConfigError.into();
    }

    let config = cli.provider_config();
    let command = match cli.command {
        Commands::Resource(command) => command,
        Commands::Schema => {
            return match print_json(&windns_core::schema::schema()) {
                Ok(()) => WinDnsExitCode::Success.into(),
                Err(e) => {
                    error!("Failed to print schema: {}", e);
                    WinDnsExitCode::RuntimeError.into()
                }
            };
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return WinDnsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return WinDnsExitCode::RuntimeError.into();
        }
    };

    let state_path = cli.state_path;
    rt.block_on(async move {
        match run(command, config, &state_path).await {
            Ok(()) => WinDnsExitCode::Success,
            Err(e) => {
                error!("{}", e);
                WinDnsExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Build the provider client and run one command
async fn run(command: ResourceCommand, config: ProviderConfig, state_path: &str) -> Result<()> {
    let registry = ExecutorRegistry::new();
    windns_powershell::register(&registry);

    let executor = registry.create_executor(&config.executor)?;
    info!(
        server = %config.connection.server,
        executor = executor.executor_name(),
        "Provider configured"
    );
    let client = WinDnsClient::new(config.connection, Arc::from(executor));

    match command {
        ResourceCommand::Create(args) => {
            let mut data = ResourceData::from(args);
            client.create_record(&mut data).await?;
            print_json(&data)
        }
        ResourceCommand::Read(args) => {
            let mut data = ResourceData::from(args);
            client.read_record(&mut data).await?;
            print_json(&data)
        }
        ResourceCommand::Delete(args) => {
            let mut data = ResourceData::from(args);
            client.delete_record(&mut data).await?;
            print_json(&data)
        }
        ResourceCommand::Apply { address, record } => {
            let driver = state_driver(client, state_path).await?;
            let outcome = driver.apply(&address, &ResourceData::from(record)).await?;
            info!(address = %address, outcome = ?outcome, "Apply complete");
            println!("{}", outcome.id());
            Ok(())
        }
        ResourceCommand::Refresh { address } => {
            let driver = state_driver(client, state_path).await?;
            match driver.refresh(&address).await? {
                Some(data) => print_json(&data),
                None => {
                    println!("{} no longer exists", address);
                    Ok(())
                }
            }
        }
        ResourceCommand::Destroy { address } => {
            let driver = state_driver(client, state_path).await?;
            driver.destroy(&address).await?;
            println!("{} destroyed", address);
            Ok(())
        }
        ResourceCommand::List => {
            let driver = state_driver(client, state_path).await?;
            for address in driver.list().await? {
                println!("{}", address);
            }
            Ok(())
        }
    }
}

async fn state_driver(client: WinDnsClient, state_path: &str) -> Result<Driver> {
    let store = FileStateStore::new(state_path).await?;
    Ok(Driver::new(client, Box::new(store)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
