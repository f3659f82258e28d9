pub mod header;
pub mod record;

use pcd_core::pointcloud::point::{PointCloud, PointRecord};

use crate::error::ParseError;

use self::header::decode_header;
use self::record::{decode_point_record, POINT_RECORD_STRIDE};

use super::Parser;

#[derive(Debug, Clone, Copy, Default)]
pub struct LasParser;

impl Parser for LasParser {
    fn parse(&self, buffer: &[u8]) -> Result<PointCloud, ParseError> {
        decode(buffer)
    }
}

/// Decodes the public header and every point record of a LAS buffer, in file order.
///
/// Variable length records are skipped: decoding jumps straight to the
/// point data offset stored in the header.
pub fn decode(buffer: &[u8]) -> Result<PointCloud, ParseError> {
    let (summary, metadata) = decode_header(buffer)?;

    if metadata.point_data_record_length as usize != POINT_RECORD_STRIDE {
        log::warn!(
            "header declares {}-byte point records, decoding with a {}-byte stride",
            metadata.point_data_record_length,
            POINT_RECORD_STRIDE
        );
    }

    let start = summary.point_data_offset as u64;
    let end = start + summary.point_record_count as u64 * POINT_RECORD_STRIDE as u64;
    if end > buffer.len() as u64 {
        return Err(ParseError::TruncatedData {
            offset: summary.point_data_offset,
            count: summary.point_record_count,
            stride: POINT_RECORD_STRIDE,
            available: buffer.len(),
        });
    }

    log::debug!(
        "decoding {} point records from offset {}",
        summary.point_record_count,
        summary.point_data_offset
    );

    let points: Vec<PointRecord> = buffer[start as usize..end as usize]
        .chunks_exact(POINT_RECORD_STRIDE)
        .map(decode_point_record)
        .collect();

    Ok(PointCloud::new(summary, metadata, points))
}
