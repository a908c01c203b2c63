//! PowerShell command rendering
//!
//! Values are concatenated into the command text verbatim. Nothing is quoted
//! or escaped, so zone or record names containing spaces or PowerShell
//! metacharacters produce a broken (or different) command.

use crate::record::{DnsRecord, RecordData};

/// Marker printed by the lookup script when the record exists
pub const RECORD_FOUND_MARKER: &str = "RECORD_FOUND";

/// Render the command that adds `record` to its zone
pub fn add_command(record: &DnsRecord) -> String {
    let zone = &record.zone_name;
    let name = &record.record_name;

    match &record.data {
        RecordData::A { ipv4address } => format!(
            "Add-DNSServerResourceRecord -ZoneName {} -A -Name {} -IPv4Address {}",
            zone, name, ipv4address
        ),
        RecordData::Cname { hostnamealias } => format!(
            "Add-DNSServerResourceRecord -ZoneName {} -CNAME -Name {} -HostNameAlias {}",
            zone, name, hostnamealias
        ),
        RecordData::Ptr { ipv4address } => format!(
            "Add-DnsServerResourceRecordPtr -ZoneName {} -PtrDomainName {} -Name {}",
            zone, name, ipv4address
        ),
    }
}

/// Render the command that removes `record` from its zone.
///
/// For PTR records the IPv4 address goes into `-Name`, not the record name.
pub fn remove_command(record: &DnsRecord) -> String {
    let name = match &record.data {
        RecordData::A { .. } | RecordData::Cname { .. } => record.record_name.as_str(),
        RecordData::Ptr { ipv4address } => ipv4address.as_str(),
    };

    format!(
        "Remove-DNSServerResourceRecord -ZoneName {} -RRType {} -Name {} -Confirm:$false -Force",
        record.zone_name,
        record.record_type(),
        name
    )
}

/// Render the lookup script.
///
/// A failed lookup is swallowed inside the script; the marker is printed only
/// when a record came back. `record_type` is inserted as given.
pub fn lookup_command(zone_name: &str, record_name: &str, record_type: &str) -> String {
    format!(
        "try {{ $record = Get-DnsServerResourceRecord -ZoneName {} -RRType {} -Name {} -ErrorAction Stop }} catch {{ $record = '''' }}; if ($record) {{ write-host '{}' }}",
        zone_name, record_type, record_name, RECORD_FOUND_MARKER
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(data: RecordData) -> DnsRecord {
        DnsRecord {
            zone_name: "contoso.com".to_string(),
            record_name: "host03".to_string(),
            data,
        }
    }

    #[test]
    fn test_add_a() {
        let r = record(RecordData::A {
            ipv4address: "10.0.0.5".to_string(),
        });
        assert_eq!(
            add_command(&r),
            "Add-DNSServerResourceRecord -ZoneName contoso.com -A -Name host03 -IPv4Address 10.0.0.5"
        );
    }

    #[test]
    fn test_add_cname() {
        let r = record(RecordData::Cname {
            hostnamealias: "web.contoso.com".to_string(),
        });
        assert_eq!(
            add_command(&r),
            "Add-DNSServerResourceRecord -ZoneName contoso.com -CNAME -Name host03 -HostNameAlias web.contoso.com"
        );
    }

    #[test]
    fn test_add_ptr() {
        let r = DnsRecord {
            zone_name: "0.0.10.in-addr.arpa".to_string(),
            record_name: "host03.contoso.com".to_string(),
            data: RecordData::Ptr {
                ipv4address: "5".to_string(),
            },
        };
        assert_eq!(
            add_command(&r),
            "Add-DnsServerResourceRecordPtr -ZoneName 0.0.10.in-addr.arpa -PtrDomainName host03.contoso.com -Name 5"
        );
    }

    #[test]
    fn test_remove_uses_record_name_for_a_and_cname() {
        let a = record(RecordData::A {
            ipv4address: "10.0.0.5".to_string(),
        });
        assert_eq!(
            remove_command(&a),
            "Remove-DNSServerResourceRecord -ZoneName contoso.com -RRType A -Name host03 -Confirm:$false -Force"
        );

        let cname = record(RecordData::Cname {
            hostnamealias: "web.contoso.com".to_string(),
        });
        assert_eq!(
            remove_command(&cname),
            "Remove-DNSServerResourceRecord -ZoneName contoso.com -RRType CNAME -Name host03 -Confirm:$false -Force"
        );
    }

    #[test]
    fn test_remove_ptr_uses_address_as_name() {
        let r = record(RecordData::Ptr {
            ipv4address: "10.0.0.5".to_string(),
        });
        assert_eq!(
            remove_command(&r),
            "Remove-DNSServerResourceRecord -ZoneName contoso.com -RRType PTR -Name 10.0.0.5 -Confirm:$false -Force"
        );
    }

    #[test]
    fn test_lookup_script() {
        assert_eq!(
            lookup_command("contoso.com", "host03", "A"),
            "try { $record = Get-DnsServerResourceRecord -ZoneName contoso.com -RRType A -Name host03 -ErrorAction Stop } catch { $record = '''' }; if ($record) { write-host 'RECORD_FOUND' }"
        );
    }

    #[test]
    fn test_values_are_not_quoted() {
        let r = DnsRecord {
            zone_name: "contoso.com".to_string(),
            record_name: "my host".to_string(),
            data: RecordData::A {
                ipv4address: "10.0.0.5".to_string(),
            },
        };
        assert!(add_command(&r).contains("-Name my host -IPv4Address"));
    }
}
