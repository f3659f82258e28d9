use byteorder::{ByteOrder as _, LittleEndian};

use pcd_core::pointcloud::{
    header::{HeaderSummary, Metadata},
    point::BoundingVolume,
};

use crate::error::FormatError;

/// Size of the LAS 1.3 public header block.
pub const PUBLIC_HEADER_SIZE: usize = 235;

const SIGNATURE: usize = 0;
const FILE_SOURCE_ID: usize = 4;
const GLOBAL_ENCODING: usize = 6;
const PROJECT_ID: usize = 8;
const VERSION_MAJOR: usize = 24;
const VERSION_MINOR: usize = 25;
const SYSTEM_IDENTIFIER: usize = 26;
const GENERATING_SOFTWARE: usize = 58;
const CREATION_DAY_OF_YEAR: usize = 90;
const CREATION_YEAR: usize = 92;
const HEADER_SIZE: usize = 94;
const OFFSET_TO_POINT_DATA: usize = 96;
const NUMBER_OF_VLRS: usize = 100;
const POINT_DATA_FORMAT_ID: usize = 104;
const POINT_DATA_RECORD_LENGTH: usize = 105;
const LEGACY_POINT_COUNT: usize = 107;
const LEGACY_POINT_COUNT_BY_RETURN: usize = 111;
const SCALE: usize = 131;
const OFFSET: usize = 155;
const EXTENTS: usize = 179;
const START_OF_WAVEFORM_DATA: usize = 227;

/// Reads the public header.
///
/// Only the signature, the point data offset and the legacy point count are
/// checked or used by the caller; every other field is copied into
/// [`Metadata`] for reporting.
pub fn decode_header(buffer: &[u8]) -> Result<(HeaderSummary, Metadata), FormatError> {
    if buffer.len() < PUBLIC_HEADER_SIZE {
        return Err(FormatError::HeaderTooShort {
            actual: buffer.len(),
            required: PUBLIC_HEADER_SIZE,
        });
    }

    let mut signature = [0u8; 4];
    signature.copy_from_slice(&buffer[SIGNATURE..SIGNATURE + 4]);
    let summary = HeaderSummary {
        signature,
        point_data_offset: LittleEndian::read_u32(&buffer[OFFSET_TO_POINT_DATA..]),
        point_record_count: LittleEndian::read_u32(&buffer[LEGACY_POINT_COUNT..]),
    };
    if !summary.has_valid_signature() {
        return Err(FormatError::InvalidSignature { found: signature });
    }

    Ok((summary, decode_metadata(buffer)))
}

fn decode_metadata(buffer: &[u8]) -> Metadata {
    let mut legacy_point_count_by_return = [0u32; 5];
    LittleEndian::read_u32_into(
        &buffer[LEGACY_POINT_COUNT_BY_RETURN..LEGACY_POINT_COUNT_BY_RETURN + 20],
        &mut legacy_point_count_by_return,
    );

    let mut scale = [0f64; 3];
    LittleEndian::read_f64_into(&buffer[SCALE..SCALE + 24], &mut scale);
    let mut offset = [0f64; 3];
    LittleEndian::read_f64_into(&buffer[OFFSET..OFFSET + 24], &mut offset);

    // stored as max X, min X, max Y, min Y, max Z, min Z
    let mut extents = [0f64; 6];
    LittleEndian::read_f64_into(&buffer[EXTENTS..EXTENTS + 48], &mut extents);
    let bounding_volume = BoundingVolume {
        min: [extents[1], extents[3], extents[5]],
        max: [extents[0], extents[2], extents[4]],
    };

    Metadata {
        file_source_id: LittleEndian::read_u16(&buffer[FILE_SOURCE_ID..]),
        global_encoding: LittleEndian::read_u16(&buffer[GLOBAL_ENCODING..]),
        project_id: format_project_id(&buffer[PROJECT_ID..PROJECT_ID + 16]),
        version_major: buffer[VERSION_MAJOR],
        version_minor: buffer[VERSION_MINOR],
        system_identifier: read_text(&buffer[SYSTEM_IDENTIFIER..SYSTEM_IDENTIFIER + 32]),
        generating_software: read_text(&buffer[GENERATING_SOFTWARE..GENERATING_SOFTWARE + 32]),
        creation_day_of_year: LittleEndian::read_u16(&buffer[CREATION_DAY_OF_YEAR..]),
        creation_year: LittleEndian::read_u16(&buffer[CREATION_YEAR..]),
        header_size: LittleEndian::read_u16(&buffer[HEADER_SIZE..]),
        number_of_variable_length_records: LittleEndian::read_u32(&buffer[NUMBER_OF_VLRS..]),
        point_data_format_id: buffer[POINT_DATA_FORMAT_ID],
        point_data_record_length: LittleEndian::read_u16(&buffer[POINT_DATA_RECORD_LENGTH..]),
        legacy_point_count_by_return,
        scale,
        offset,
        bounding_volume,
        start_of_waveform_data: LittleEndian::read_u64(&buffer[START_OF_WAVEFORM_DATA..]),
    }
}

// GUID data 1-4: u32, u16, u16, then 8 raw bytes
fn format_project_id(bytes: &[u8]) -> String {
    let data1 = LittleEndian::read_u32(&bytes[0..4]);
    let data2 = LittleEndian::read_u16(&bytes[4..6]);
    let data3 = LittleEndian::read_u16(&bytes[6..8]);
    let data4: String = bytes[8..16].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{:08x}-{:04x}-{:04x}-{}", data1, data2, data3, data4)
}

fn read_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c: char| c == '\0' || c == ' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header() -> Vec<u8> {
        let mut buffer = vec![0u8; PUBLIC_HEADER_SIZE];
        buffer[0..4].copy_from_slice(b"LASF");
        LittleEndian::write_u16(&mut buffer[FILE_SOURCE_ID..], 42);
        LittleEndian::write_u32(&mut buffer[PROJECT_ID..], 0xdeadbeef);
        LittleEndian::write_u16(&mut buffer[PROJECT_ID + 4..], 0x0102);
        LittleEndian::write_u16(&mut buffer[PROJECT_ID + 6..], 0x0304);
        buffer[PROJECT_ID + 8..PROJECT_ID + 16].copy_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
        buffer[VERSION_MAJOR] = 1;
        buffer[VERSION_MINOR] = 3;
        buffer[SYSTEM_IDENTIFIER..SYSTEM_IDENTIFIER + 6].copy_from_slice(b"SENSOR");
        buffer[GENERATING_SOFTWARE..GENERATING_SOFTWARE + 8].copy_from_slice(b"tool 1  ");
        LittleEndian::write_u16(&mut buffer[CREATION_DAY_OF_YEAR..], 200);
        LittleEndian::write_u16(&mut buffer[CREATION_YEAR..], 2021);
        LittleEndian::write_u16(&mut buffer[HEADER_SIZE..], PUBLIC_HEADER_SIZE as u16);
        LittleEndian::write_u32(&mut buffer[OFFSET_TO_POINT_DATA..], 235);
        buffer[POINT_DATA_FORMAT_ID] = 1;
        LittleEndian::write_u16(&mut buffer[POINT_DATA_RECORD_LENGTH..], 28);
        LittleEndian::write_u32(&mut buffer[LEGACY_POINT_COUNT..], 17);
        LittleEndian::write_u32_into(
            &[10, 5, 2, 0, 0],
            &mut buffer[LEGACY_POINT_COUNT_BY_RETURN..LEGACY_POINT_COUNT_BY_RETURN + 20],
        );
        LittleEndian::write_f64_into(&[0.01, 0.01, 0.001], &mut buffer[SCALE..SCALE + 24]);
        LittleEndian::write_f64_into(&[100.0, 200.0, 0.0], &mut buffer[OFFSET..OFFSET + 24]);
        LittleEndian::write_f64_into(
            &[10.0, -10.0, 20.0, -20.0, 30.0, -30.0],
            &mut buffer[EXTENTS..EXTENTS + 48],
        );
        LittleEndian::write_u64(&mut buffer[START_OF_WAVEFORM_DATA..], 9000);
        buffer
    }

    #[test]
    fn test_decode_header_summary() {
        let (summary, _) = decode_header(&make_header()).unwrap();
        assert!(summary.has_valid_signature());
        assert_eq!(summary.point_data_offset, 235);
        assert_eq!(summary.point_record_count, 17);
    }

    #[test]
    fn test_decode_header_metadata() {
        let (_, metadata) = decode_header(&make_header()).unwrap();

        assert_eq!(metadata.file_source_id, 42);
        assert_eq!(
            metadata.project_id,
            "deadbeef-0102-0304-0001020304050607"
        );
        assert_eq!(metadata.version(), "1.3");
        assert_eq!(metadata.system_identifier, "SENSOR");
        assert_eq!(metadata.generating_software, "tool 1");
        assert_eq!(metadata.creation_day_of_year, 200);
        assert_eq!(metadata.creation_year, 2021);
        assert_eq!(metadata.header_size, 235);
        assert_eq!(metadata.point_data_format_id, 1);
        assert_eq!(metadata.point_data_record_length, 28);
        assert_eq!(metadata.legacy_point_count_by_return, [10, 5, 2, 0, 0]);
        assert_eq!(metadata.scale, [0.01, 0.01, 0.001]);
        assert_eq!(metadata.offset, [100.0, 200.0, 0.0]);
        assert_eq!(metadata.bounding_volume.min, [-10.0, -20.0, -30.0]);
        assert_eq!(metadata.bounding_volume.max, [10.0, 20.0, 30.0]);
        assert_eq!(metadata.start_of_waveform_data, 9000);
    }

    #[test]
    fn test_short_header_is_rejected() {
        let buffer = make_header();
        let err = decode_header(&buffer[..110]).unwrap_err();
        assert_eq!(
            err,
            FormatError::HeaderTooShort {
                actual: 110,
                required: PUBLIC_HEADER_SIZE
            }
        );
    }

    #[test]
    fn test_bad_signature_is_rejected() {
        let mut buffer = make_header();
        buffer[0..4].copy_from_slice(b"XXXX");
        let err = decode_header(&buffer).unwrap_err();
        assert_eq!(err, FormatError::InvalidSignature { found: *b"XXXX" });
    }
}
