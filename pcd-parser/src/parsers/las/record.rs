use byteorder::{ByteOrder as _, LittleEndian};

use pcd_core::pointcloud::point::PointRecord;

/// Fixed size of one point record, including two trailing unused bytes.
pub const POINT_RECORD_STRIDE: usize = 28;

const X: usize = 0;
const Y: usize = 4;
const Z: usize = 8;
const INTENSITY: usize = 12;
const CLASSIFICATION: usize = 13;
const FLAGS: usize = 14;
// Shares its byte with the return/scan flags. Kept as-is so existing files decode identically.
const SCAN_ANGLE: usize = 14;
const USER_DATA: usize = 15;
const POINT_SOURCE_ID: usize = 16;
const GPS_TIME: usize = 18;

/// Decodes a single record. `bytes` must hold at least [`POINT_RECORD_STRIDE`] bytes.
pub fn decode_point_record(bytes: &[u8]) -> PointRecord {
    let flags = bytes[FLAGS];
    let bit = |index: u8| flags & (1 << index) != 0;

    PointRecord {
        x: LittleEndian::read_i32(&bytes[X..]),
        y: LittleEndian::read_i32(&bytes[Y..]),
        z: LittleEndian::read_i32(&bytes[Z..]),
        intensity: LittleEndian::read_u16(&bytes[INTENSITY..]),
        return_number: [bit(0), bit(1), bit(2)],
        number_of_returns: [bit(3), bit(4), bit(5)],
        scan_direction_flag: bit(6),
        edge_of_flight: bit(7),
        classification: bytes[CLASSIFICATION],
        scan_angle: bytes[SCAN_ANGLE],
        user_data: bytes[USER_DATA],
        point_source_id: LittleEndian::read_u16(&bytes[POINT_SOURCE_ID..]),
        gps_time: LittleEndian::read_f64(&bytes[GPS_TIME..GPS_TIME + 8]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_point_record_fields() {
        let mut bytes = [0u8; POINT_RECORD_STRIDE];
        LittleEndian::write_i32(&mut bytes[X..], -123_456);
        LittleEndian::write_i32(&mut bytes[Y..], 987_654);
        LittleEndian::write_i32(&mut bytes[Z..], i32::MIN);
        bytes[INTENSITY] = 0x34;
        bytes[FLAGS] = 0b1010_1101;
        bytes[USER_DATA] = 9;
        LittleEndian::write_u16(&mut bytes[POINT_SOURCE_ID..], 0xbeef);
        LittleEndian::write_f64(&mut bytes[GPS_TIME..], 123_456.789);

        let record = decode_point_record(&bytes);

        assert_eq!((record.x, record.y, record.z), (-123_456, 987_654, i32::MIN));
        assert_eq!(record.intensity, 0x34);
        assert_eq!(record.return_number, [true, false, true]);
        assert_eq!(record.return_number_value(), 5);
        assert_eq!(record.number_of_returns, [true, false, true]);
        assert_eq!(record.number_of_returns_value(), 5);
        assert!(!record.scan_direction_flag);
        assert!(record.edge_of_flight);
        assert_eq!(record.user_data, 9);
        assert_eq!(record.point_source_id, 0xbeef);
        assert_eq!(record.gps_time, 123_456.789);
    }

    #[test]
    fn test_overlapping_reads() {
        let mut bytes = [0u8; POINT_RECORD_STRIDE];
        LittleEndian::write_u16(&mut bytes[INTENSITY..], 0x0bcd);
        bytes[FLAGS] = 0b0100_0011;

        let record = decode_point_record(&bytes);

        // classification is the high byte of intensity, scan angle is the flag byte
        assert_eq!(record.intensity, 0x0bcd);
        assert_eq!(record.classification, 0x0b);
        assert_eq!(record.scan_angle, 0b0100_0011);
        assert_eq!(record.return_number_value(), 3);
        assert!(record.scan_direction_flag);
    }
}
