//! Resource schema
//!
//! Describes the `windns` resource to the host: five string fields, all of
//! which force a new resource when they change.

use crate::error::{Error, Result};
use crate::resource::ResourceData;
use serde::Serialize;

/// Resource type name registered with the host
pub const RESOURCE_TYPE: &str = "windns";

/// Schema of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Field name
    pub name: &'static str,
    /// Must be set in configuration
    pub required: bool,
    /// Changing the value replaces the resource
    pub force_new: bool,
}

impl FieldSchema {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            force_new: true,
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            force_new: true,
        }
    }
}

/// Schema of the `windns` resource
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    /// Resource type name
    pub resource_type: &'static str,
    /// Field definitions, in declaration order
    pub fields: &'static [FieldSchema],
}

const FIELDS: &[FieldSchema] = &[
    FieldSchema::required("zone_name"),
    FieldSchema::required("record_name"),
    FieldSchema::required("record_type"),
    FieldSchema::optional("ipv4address"),
    FieldSchema::optional("hostnamealias"),
];

/// The `windns` resource schema
pub fn schema() -> ResourceSchema {
    ResourceSchema {
        resource_type: RESOURCE_TYPE,
        fields: FIELDS,
    }
}

fn field_value<'a>(data: &'a ResourceData, name: &str) -> Option<&'a str> {
    match name {
        "zone_name" => Some(data.zone_name.as_str()),
        "record_name" => Some(data.record_name.as_str()),
        "record_type" => Some(data.record_type.as_str()),
        "ipv4address" => data.ipv4address.as_deref(),
        "hostnamealias" => data.hostnamealias.as_deref(),
        _ => None,
    }
}

/// Check that every required field is present and non-empty
pub fn validate_required(data: &ResourceData) -> Result<()> {
    for field in FIELDS.iter().filter(|f| f.required) {
        if field_value(data, field.name).is_none_or(str::is_empty) {
            return Err(Error::validation(format!("{} is required", field.name)));
        }
    }
    Ok(())
}

/// Force-new fields whose value differs between `prior` and `desired`.
///
/// A missing optional field and an empty one are treated as equal.
pub fn replacement_fields(prior: &ResourceData, desired: &ResourceData) -> Vec<&'static str> {
    FIELDS
        .iter()
        .filter(|f| f.force_new)
        .filter(|f| {
            let before = field_value(prior, f.name).unwrap_or_default();
            let after = field_value(desired, f.name).unwrap_or_default();
            before != after
        })
        .map(|f| f.name)
        .collect()
}
