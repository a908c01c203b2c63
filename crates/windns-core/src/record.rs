//! DNS record model
//!
//! The host hands the provider a flat bag of string fields ([`ResourceData`]).
//! [`DnsRecord::from_resource`] turns that bag into a typed record, rejecting
//! unknown record types and missing companion fields before any command is
//! rendered.

use crate::error::{Error, Result};
use crate::resource::ResourceData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types the provider can manage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 host record
    A,
    /// Canonical name alias
    Cname,
    /// Reverse lookup pointer
    Ptr,
}

impl RecordType {
    /// All supported record types
    pub const ALL: [RecordType; 3] = [RecordType::A, RecordType::Cname, RecordType::Ptr];

    /// Name as used by the DNS server cmdlets and in record ids
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Cname => "CNAME",
            RecordType::Ptr => "PTR",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    /// Matching is case-sensitive: `"a"` is not a supported type.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(RecordType::A),
            "CNAME" => Ok(RecordType::Cname),
            "PTR" => Ok(RecordType::Ptr),
            other => Err(Error::unsupported_type(other)),
        }
    }
}

/// Type-specific payload of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A record pointing at an IPv4 address
    A { ipv4address: String },
    /// CNAME record pointing at another host name
    Cname { hostnamealias: String },
    /// PTR record; the address is the name inside the reverse zone
    Ptr { ipv4address: String },
}

impl RecordData {
    /// The record type of this payload
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A { .. } => RecordType::A,
            RecordData::Cname { .. } => RecordType::Cname,
            RecordData::Ptr { .. } => RecordType::Ptr,
        }
    }
}

/// A validated DNS record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Zone the record lives in (e.g. "contoso.com")
    pub zone_name: String,
    /// Record name inside the zone (e.g. "host03")
    pub record_name: String,
    /// Type and companion value
    pub data: RecordData,
}

impl DnsRecord {
    /// Build a record from raw resource fields.
    ///
    /// The record type is checked first, then the companion field it
    /// requires. Empty strings count as missing. The field that is not
    /// required for the type is ignored.
    pub fn from_resource(data: &ResourceData) -> Result<Self> {
        let record_type: RecordType = data.record_type.parse()?;

        let payload = match record_type {
            RecordType::A => RecordData::A {
                ipv4address: required_companion(data.ipv4address.as_deref(), "ipv4address", record_type)?,
            },
            RecordType::Cname => RecordData::Cname {
                hostnamealias: required_companion(
                    data.hostnamealias.as_deref(),
                    "hostnamealias",
                    record_type,
                )?,
            },
            RecordType::Ptr => RecordData::Ptr {
                ipv4address: required_companion(data.ipv4address.as_deref(), "ipv4address", record_type)?,
            },
        };

        Ok(Self {
            zone_name: data.zone_name.clone(),
            record_name: data.record_name.clone(),
            data: payload,
        })
    }

    /// The record type
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Identifier stored by the host once the record exists
    pub fn id(&self) -> String {
        record_id(&self.zone_name, &self.record_name, self.record_type().as_str())
    }
}

/// Derive the resource id: `zone_name + "_" + record_name + "_" + record_type`.
///
/// Two records that differ only in their target value share an id.
pub fn record_id(zone_name: &str, record_name: &str, record_type: &str) -> String {
    format!("{}_{}_{}", zone_name, record_name, record_type)
}

fn required_companion(
    value: Option<&str>,
    field: &str,
    record_type: RecordType,
) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::validation(format!(
            "Must provide {} if record_type is '{}'",
            field, record_type
        ))),
    }
}
