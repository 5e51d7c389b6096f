//! BitBuffer Tests
//!
//! Bit-granularity writes, absolute-range reads, and capacity enforcement.

use filewire::packet::BitBuffer;
use filewire::FtError;

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_round_trip_all_widths() {
    // For every width 1..=32, the max value and a pattern must survive
    for width in 1..=32usize {
        let max = (1u64 << width) - 1;
        let pattern = 0xA5A5_A5A5u64 & max;

        for value in [0u64, 1, max, pattern] {
            let mut buffer = BitBuffer::new(width);
            buffer.append(value, width).unwrap();
            assert_eq!(
                buffer.read_bits(0, width).unwrap(),
                value,
                "width {} value {:#x}",
                width,
                value
            );
        }
    }
}

#[test]
fn test_append_splits_across_byte_boundary() {
    let mut buffer = BitBuffer::new(11);
    buffer.append(0b101, 3).unwrap();
    buffer.append(0xFF, 8).unwrap();

    // 101 followed by 11111111: 10111111 111xxxxx
    assert_eq!(buffer.as_bytes(), &[0b1011_1111, 0b1110_0000]);
    assert_eq!(buffer.read_bits(0, 3).unwrap(), 0b101);
    assert_eq!(buffer.read_bits(3, 11).unwrap(), 0xFF);
}

#[test]
fn test_sequential_fields_layout() {
    let mut buffer = BitBuffer::new(24);
    buffer.append(0xF0F, 12).unwrap();
    buffer.append(0x0AB, 12).unwrap();

    assert_eq!(buffer.read_bits(0, 12).unwrap(), 0xF0F);
    assert_eq!(buffer.read_bits(12, 24).unwrap(), 0x0AB);
    assert_eq!(buffer.as_bytes(), &[0xF0, 0xF0, 0xAB]);
}

#[test]
fn test_multi_byte_value_is_big_endian() {
    let mut buffer = BitBuffer::new(16);
    buffer.append(0x497E, 16).unwrap();
    assert_eq!(buffer.as_bytes(), &[0x49, 0x7E]);
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_append_past_capacity_fails() {
    let mut buffer = BitBuffer::new(8);
    buffer.append(0xAA, 8).unwrap();
    let err = buffer.append(1, 1).unwrap_err();
    assert!(matches!(err, FtError::Capacity(_)));
}

#[test]
fn test_append_wider_than_capacity_fails() {
    let mut buffer = BitBuffer::new(8);
    assert!(matches!(
        buffer.append(0, 9).unwrap_err(),
        FtError::Capacity(_)
    ));
}

#[test]
fn test_append_width_over_64_fails() {
    let mut buffer = BitBuffer::new(128);
    assert!(matches!(
        buffer.append(0, 65).unwrap_err(),
        FtError::Capacity(_)
    ));
}

#[test]
fn test_capacity_rounds_up_to_whole_bytes() {
    let buffer = BitBuffer::new(11);
    assert_eq!(buffer.byte_len(), 2);
    assert_eq!(buffer.bit_len(), 11);
}

// =============================================================================
// Seeding Tests
// =============================================================================

#[test]
fn test_with_bytes_seeds_and_advances_cursor() {
    let buffer = BitBuffer::with_bytes(24, &[0xAB, 0xCD]).unwrap();
    assert_eq!(buffer.bits_written(), 16);
    assert_eq!(buffer.read_byte_range(0, 2).unwrap(), 0xABCD);
}

#[test]
fn test_with_bytes_oversized_seed_fails() {
    let err = BitBuffer::with_bytes(8, &[0x01, 0x02]).unwrap_err();
    assert!(matches!(err, FtError::Capacity(_)));
}

#[test]
fn test_seeded_buffer_accepts_more_appends() {
    let mut buffer = BitBuffer::with_bytes(24, &[0xAB, 0xCD]).unwrap();
    buffer.append(0xEF, 8).unwrap();
    assert_eq!(buffer.as_bytes(), &[0xAB, 0xCD, 0xEF]);
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_does_not_move_cursor() {
    let mut buffer = BitBuffer::new(16);
    buffer.append(0x12, 8).unwrap();

    let before = buffer.bits_written();
    buffer.read_bits(0, 8).unwrap();
    assert_eq!(buffer.bits_written(), before);

    // The cursor still points at bit 8, so the next append lands there
    buffer.append(0x34, 8).unwrap();
    assert_eq!(buffer.as_bytes(), &[0x12, 0x34]);
}

#[test]
fn test_read_byte_range_matches_read_bits() {
    let buffer = BitBuffer::with_bytes(32, &[0x01, 0x02, 0x03, 0x04]).unwrap();
    assert_eq!(
        buffer.read_byte_range(1, 3).unwrap(),
        buffer.read_bits(8, 24).unwrap()
    );
    assert_eq!(buffer.read_byte_range(0, 4).unwrap(), 0x0102_0304);
}

#[test]
fn test_read_past_end_fails() {
    let buffer = BitBuffer::new(8);
    assert!(matches!(
        buffer.read_bits(0, 9).unwrap_err(),
        FtError::MalformedHeader(_)
    ));
}

#[test]
fn test_read_inverted_range_fails() {
    let buffer = BitBuffer::new(16);
    assert!(matches!(
        buffer.read_bits(8, 4).unwrap_err(),
        FtError::MalformedHeader(_)
    ));
}

#[test]
fn test_read_unwritten_bits_are_zero() {
    let buffer = BitBuffer::new(16);
    assert_eq!(buffer.read_bits(0, 16).unwrap(), 0);
}
