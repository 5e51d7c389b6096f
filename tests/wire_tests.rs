//! FieldCodec Tests
//!
//! Schema layout, header value slots, encoding, and host-order
//! reinterpretation.

use filewire::wire::{to_host_order, Field, HeaderValues, Schema};
use filewire::FtError;

/// A three-field layout exercising both 8-bit and multi-byte fields
static TEST_SCHEMA: Schema = Schema::new(&[
    Field { name: "Alpha", bits: 16 },
    Field { name: "Beta", bits: 8 },
    Field { name: "Gamma", bits: 16 },
]);

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_schema_totals() {
    assert_eq!(TEST_SCHEMA.total_bits(), 40);
    assert_eq!(TEST_SCHEMA.byte_len(), 5);
}

#[test]
fn test_field_offsets_and_widths() {
    assert_eq!(TEST_SCHEMA.bit_offset("Alpha").unwrap(), 0);
    assert_eq!(TEST_SCHEMA.bit_offset("Beta").unwrap(), 16);
    assert_eq!(TEST_SCHEMA.bit_offset("Gamma").unwrap(), 24);

    assert_eq!(TEST_SCHEMA.width("Beta").unwrap(), 8);
    assert!(matches!(
        TEST_SCHEMA.bit_offset("Delta").unwrap_err(),
        FtError::Schema(_)
    ));
}

// =============================================================================
// Encoding Tests
// =============================================================================

fn full_values() -> HeaderValues {
    let mut values = HeaderValues::new(TEST_SCHEMA);
    values.set("Alpha", 0x1234).unwrap();
    values.set("Beta", 0x56).unwrap();
    values.set("Gamma", 0x789A).unwrap();
    values
}

#[test]
fn test_encode_layout_is_network_order() {
    let buffer = full_values().encode().unwrap();
    assert_eq!(buffer.as_bytes(), &[0x12, 0x34, 0x56, 0x78, 0x9A]);
}

#[test]
fn test_encode_unset_field_fails() {
    let mut values = HeaderValues::new(TEST_SCHEMA);
    values.set("Alpha", 1).unwrap();
    values.set("Gamma", 2).unwrap();

    let err = values.encode().unwrap_err();
    match err {
        FtError::Schema(msg) => assert!(msg.contains("Beta")),
        other => panic!("expected Schema error, got {:?}", other),
    }
}

#[test]
fn test_set_unknown_field_fails() {
    let mut values = HeaderValues::new(TEST_SCHEMA);
    assert!(matches!(
        values.set("Delta", 1).unwrap_err(),
        FtError::Schema(_)
    ));
}

#[test]
fn test_set_oversized_value_fails() {
    let mut values = HeaderValues::new(TEST_SCHEMA);
    assert!(matches!(
        values.set("Beta", 0x100).unwrap_err(),
        FtError::Schema(_)
    ));
}

#[test]
fn test_get_returns_set_values() {
    let values = full_values();
    assert_eq!(values.get("Alpha"), Some(0x1234));
    assert_eq!(values.get("Delta"), None);

    let mut unset = HeaderValues::new(TEST_SCHEMA);
    assert_eq!(unset.get("Alpha"), None);
    unset.set("Alpha", 7).unwrap();
    assert_eq!(unset.get("Alpha"), Some(7));
}

// =============================================================================
// Host-order Reinterpretation Tests
// =============================================================================

#[test]
fn test_to_host_order_recovers_field_values() {
    let wire = full_values().encode().unwrap();
    let host = to_host_order(TEST_SCHEMA, wire.as_bytes()).unwrap();

    assert_eq!(TEST_SCHEMA.read_field(&host, "Alpha").unwrap(), 0x1234);
    assert_eq!(TEST_SCHEMA.read_field(&host, "Beta").unwrap(), 0x56);
    assert_eq!(TEST_SCHEMA.read_field(&host, "Gamma").unwrap(), 0x789A);
}

#[test]
fn test_to_host_order_is_idempotent() {
    // Reapplying the conversion must not double-swap multi-byte fields
    let wire = full_values().encode().unwrap();
    let once = to_host_order(TEST_SCHEMA, wire.as_bytes()).unwrap();
    let twice = to_host_order(TEST_SCHEMA, once.as_bytes()).unwrap();

    assert_eq!(once.as_bytes(), twice.as_bytes());
}

#[test]
fn test_to_host_order_short_buffer_fails() {
    let err = to_host_order(TEST_SCHEMA, &[0x12, 0x34]).unwrap_err();
    assert!(matches!(err, FtError::MalformedHeader(_)));
}

#[test]
fn test_to_host_order_ignores_trailing_payload() {
    // A header at the front of a longer buffer decodes from just its bytes
    let mut wire = full_values().encode().unwrap().into_bytes();
    wire.extend_from_slice(b"payload");

    let host = to_host_order(TEST_SCHEMA, &wire).unwrap();
    assert_eq!(host.byte_len(), TEST_SCHEMA.byte_len());
    assert_eq!(TEST_SCHEMA.read_field(&host, "Gamma").unwrap(), 0x789A);
}
