//! Lifecycle Contract Test: Read
//!
//! Constraints verified:
//! - A successful lookup sets the id, whatever the output says
//! - An `ObjectNotFound` failure clears the id and is not an error
//! - Any other failure surfaces and leaves the id untouched
//! - Read neither validates companion fields nor the record type

mod common;

use common::*;
use windns_core::{Error, ResourceData};

#[tokio::test]
async fn read_success_sets_id() {
    let executor = RecordingExecutor::new();
    executor.push_ok("RECORD_FOUND");
    let client = client_with(&executor);

    let mut data = a_record("contoso.com", "host03", "10.0.0.5");
    client.read_record(&mut data).await.expect("read succeeds");

    assert_eq!(data.id(), Some("contoso.com_host03_A"));
    assert_eq!(
        executor.last_command().as_deref(),
        Some(
            "try { $record = Get-DnsServerResourceRecord -ZoneName contoso.com -RRType A -Name host03 -ErrorAction Stop } catch { $record = '''' }; if ($record) { write-host 'RECORD_FOUND' }"
        )
    );
}

#[tokio::test]
async fn read_success_without_marker_still_counts_as_found() {
    let executor = RecordingExecutor::new();
    executor.push_ok("");
    let client = client_with(&executor);

    let mut data = cname_record("contoso.com", "www", "web01.contoso.com");
    client.read_record(&mut data).await.expect("read succeeds");

    assert_eq!(data.id(), Some("contoso.com_www_CNAME"));
}

#[tokio::test]
async fn read_object_not_found_clears_id() {
    let executor = RecordingExecutor::new();
    executor.push_err(OBJECT_NOT_FOUND_TEXT);
    let client = client_with(&executor);

    let mut data = a_record("contoso.com", "host03", "10.0.0.5");
    data.set_id("contoso.com_host03_A");

    client
        .read_record(&mut data)
        .await
        .expect("not found is not an error");

    assert_eq!(data.id(), None);
    assert_eq!(executor.call_count(), 1);
}

#[tokio::test]
async fn read_other_error_surfaces_and_leaves_id_unset() {
    let executor = RecordingExecutor::new();
    executor.push_err("Connecting to remote server dns01.contoso.com failed: Access is denied.");
    let client = client_with(&executor);

    let mut data = a_record("contoso.com", "host03", "10.0.0.5");
    let err = client
        .read_record(&mut data)
        .await
        .expect_err("transport failure surfaces");

    assert!(matches!(err, Error::Execution(_)));
    assert!(err.to_string().contains("Access is denied"));
    assert_eq!(data.id(), None);
}

#[tokio::test]
async fn read_other_error_keeps_existing_id() {
    let executor = RecordingExecutor::new();
    executor.push_err("WinRM cannot complete the operation.");
    let client = client_with(&executor);

    let mut data = a_record("contoso.com", "host03", "10.0.0.5");
    data.set_id("contoso.com_host03_A");

    assert!(client.read_record(&mut data).await.is_err());
    assert_eq!(data.id(), Some("contoso.com_host03_A"));
}

#[tokio::test]
async fn read_does_not_validate_companion_or_type() {
    let executor = RecordingExecutor::new();
    let client = client_with(&executor);

    let mut missing_ip = ResourceData::new("contoso.com", "host03", "A");
    client
        .read_record(&mut missing_ip)
        .await
        .expect("no companion check on read");
    assert_eq!(missing_ip.id(), Some("contoso.com_host03_A"));

    let mut mx = ResourceData::new("contoso.com", "mail", "MX");
    client
        .read_record(&mut mx)
        .await
        .expect("type is passed through on read");
    assert!(
        executor
            .last_command()
            .unwrap()
            .contains("-RRType MX -Name mail")
    );
    assert_eq!(executor.call_count(), 2);
}
