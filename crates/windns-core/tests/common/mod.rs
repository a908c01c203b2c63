//! Test doubles and common utilities for lifecycle contract tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use windns_core::error::{Error, Result};
use windns_core::{CommandExecutor, ConnectionProfile, ResourceData, WinDnsClient};

/// Error text the DNS server cmdlets produce for a missing record
pub const OBJECT_NOT_FOUND_TEXT: &str = "Get-DnsServerResourceRecord : Failed to get host03 record in contoso.com zone on DNS01 server.\n    + CategoryInfo          : ObjectNotFound: (host03:root/Microsoft/...rResourceRecord) [Get-DnsServerResourceRecord], CimException";

/// An executor that records every command and replays scripted results
///
/// When the script runs out, every call succeeds with `RECORD_FOUND`.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    call_count: Arc<AtomicUsize>,
    commands: Arc<Mutex<Vec<String>>>,
    servers: Arc<Mutex<Vec<String>>>,
    script: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result
    pub fn push_ok(&self, output: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(output.to_string()));
    }

    /// Queue a failing result
    pub fn push_err(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Number of times execute() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Commands received, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// The most recent command
    pub fn last_command(&self) -> Option<String> {
        self.commands.lock().unwrap().last().cloned()
    }

    /// Servers the commands were sent to, in order
    pub fn servers(&self) -> Vec<String> {
        self.servers.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &str, profile: &ConnectionProfile) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.commands.lock().unwrap().push(command.to_string());
        self.servers.lock().unwrap().push(profile.server.clone());

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(Error::execution(message)),
            None => Ok("RECORD_FOUND".to_string()),
        }
    }

    fn executor_name(&self) -> &'static str {
        "recording"
    }
}

/// Build a client around a recording executor
pub fn client_with(executor: &RecordingExecutor) -> WinDnsClient {
    WinDnsClient::new(
        ConnectionProfile::new("CONTOSO\\dnsadmin", "secret", "dns01.contoso.com"),
        Arc::new(executor.clone()),
    )
}

pub fn a_record(zone: &str, name: &str, ip: &str) -> ResourceData {
    ResourceData::new(zone, name, "A").with_ipv4address(ip)
}

pub fn cname_record(zone: &str, name: &str, alias: &str) -> ResourceData {
    ResourceData::new(zone, name, "CNAME").with_hostnamealias(alias)
}

pub fn ptr_record(zone: &str, name: &str, ip: &str) -> ResourceData {
    ResourceData::new(zone, name, "PTR").with_ipv4address(ip)
}
