use serde::{Deserialize, Serialize};

use super::point::BoundingVolume;

pub const LAS_SIGNATURE: [u8; 4] = *b"LASF";

/// The three header fields that drive decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSummary {
    pub signature: [u8; 4],
    pub point_data_offset: u32,
    pub point_record_count: u32,
}

impl HeaderSummary {
    pub fn has_valid_signature(&self) -> bool {
        self.signature == LAS_SIGNATURE
    }
}

// Descriptive LAS 1.3 public header fields. Reporting only, decoding never branches on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub file_source_id: u16,
    pub global_encoding: u16,
    pub project_id: String,
    pub version_major: u8,
    pub version_minor: u8,
    pub system_identifier: String,
    pub generating_software: String,
    pub creation_day_of_year: u16,
    pub creation_year: u16,
    pub header_size: u16,
    pub number_of_variable_length_records: u32,
    pub point_data_format_id: u8,
    pub point_data_record_length: u16,
    pub legacy_point_count_by_return: [u32; 5],
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    pub bounding_volume: BoundingVolume,
    pub start_of_waveform_data: u64,
}

impl Metadata {
    pub fn version(&self) -> String {
        format!("{}.{}", self.version_major, self.version_minor)
    }
}
