//! Record lifecycle adapter
//!
//! The host drives three callbacks per resource: Create, Read and Delete.
//! Each one renders a single PowerShell command, runs it through the
//! configured [`CommandExecutor`] exactly once and maps the outcome onto the
//! resource id:
//!
//! | Callback | Success | `ObjectNotFound` failure | Other failure |
//! |---|---|---|---|
//! | Create | id set | error | error |
//! | Read | id set | id cleared, no error | error, id untouched |
//! | Delete | id cleared | error | error |
//!
//! There is no Update callback: every field forces replacement.

use crate::command;
use crate::config::ConnectionProfile;
use crate::error::Result;
use crate::record::{self, DnsRecord};
use crate::traits::CommandExecutor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Raw resource fields as delivered by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Zone the record lives in
    pub zone_name: String,
    /// Record name inside the zone
    pub record_name: String,
    /// "A", "CNAME" or "PTR"
    pub record_type: String,
    /// Required for A and PTR records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4address: Option<String>,
    /// Required for CNAME records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnamealias: Option<String>,
    /// Set once the record is known to exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ResourceData {
    /// Create resource data without companion fields
    pub fn new(
        zone_name: impl Into<String>,
        record_name: impl Into<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            zone_name: zone_name.into(),
            record_name: record_name.into(),
            record_type: record_type.into(),
            ..Self::default()
        }
    }

    /// Set the IPv4 address
    pub fn with_ipv4address(mut self, ipv4address: impl Into<String>) -> Self {
        self.ipv4address = Some(ipv4address.into());
        self
    }

    /// Set the host name alias
    pub fn with_hostnamealias(mut self, hostnamealias: impl Into<String>) -> Self {
        self.hostnamealias = Some(hostnamealias.into());
        self
    }

    /// The resource id, if the record is known to exist
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The id this resource gets once it exists
    pub fn derived_id(&self) -> String {
        record::record_id(&self.zone_name, &self.record_name, &self.record_type)
    }

    /// Mark the resource as existing
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.id = None;
    }
}

/// Connection profile plus the executor that uses it
///
/// This is the provider-level context every lifecycle callback receives.
#[derive(Clone)]
pub struct WinDnsClient {
    profile: ConnectionProfile,
    executor: Arc<dyn CommandExecutor>,
}

impl std::fmt::Debug for WinDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinDnsClient")
            .field("profile", &self.profile)
            .field("executor", &self.executor.executor_name())
            .finish()
    }
}

impl WinDnsClient {
    /// Create a client from a profile and an executor
    pub fn new(profile: ConnectionProfile, executor: Arc<dyn CommandExecutor>) -> Self {
        Self { profile, executor }
    }

    /// The connection profile
    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    /// Create the record described by `data`.
    ///
    /// Validation failures return before anything is sent to the server.
    /// Execution failures are returned as they are. On success the id is set.
    pub async fn create_record(&self, data: &mut ResourceData) -> Result<()> {
        let record = DnsRecord::from_resource(data)?;
        let ps_command = command::add_command(&record);

        self.run(&ps_command).await?;

        let id = record.id();
        info!(id = %id, "Created DNS record");
        data.set_id(id);
        Ok(())
    }

    /// Refresh the resource against the server.
    ///
    /// The record type is not validated and the output of the lookup script
    /// is not inspected: any successful run counts as "record exists".
    pub async fn read_record(&self, data: &mut ResourceData) -> Result<()> {
        let ps_command =
            command::lookup_command(&data.zone_name, &data.record_name, &data.record_type);

        match self.run(&ps_command).await {
            Ok(output) => {
                if !output.contains(command::RECORD_FOUND_MARKER) {
                    debug!("Lookup succeeded without printing the found marker");
                }
                data.set_id(data.derived_id());
                Ok(())
            }
            Err(e) if e.is_object_not_found() => {
                info!(
                    zone = %data.zone_name,
                    name = %data.record_name,
                    "DNS record not found, removing from state"
                );
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete the record described by `data`.
    ///
    /// Validation is the same as for create. On success the id is cleared.
    pub async fn delete_record(&self, data: &mut ResourceData) -> Result<()> {
        let record = DnsRecord::from_resource(data)?;
        let ps_command = command::remove_command(&record);

        self.run(&ps_command).await?;

        info!(id = %record.id(), "Deleted DNS record");
        data.clear_id();
        Ok(())
    }

    async fn run(&self, ps_command: &str) -> Result<String> {
        debug!(
            executor = self.executor.executor_name(),
            server = %self.profile.server,
            command = %ps_command,
            "Running PowerShell command"
        );
        self.executor.execute(ps_command, &self.profile).await
    }
}
