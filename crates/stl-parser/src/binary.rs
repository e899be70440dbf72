use std::collections::TryReserveError;

use log::warn;
use rs42::extensions::{vec::TryPush, PipeLine};

use crate::{
    Facet, ParseOptions, Solid, StlParsingError, StlParsingErrorDetail, TrailingData, Vec3,
};

/*
UINT8[80]    – Header                 -     80 bytes
UINT32       – Number of triangles    -      4 bytes

foreach triangle                      - 50 bytes:
    REAL32[3] – Normal vector             - 12 bytes
    REAL32[3] – Vertex 1                  - 12 bytes
    REAL32[3] – Vertex 2                  - 12 bytes
    REAL32[3] – Vertex 3                  - 12 bytes
    UINT16    – Attribute byte count      -  2 bytes
end

Everything is little-endian, without padding.
*/
pub const HEADER_SIZE: usize = 80;
pub const SOLID_HEADER_SIZE: usize = HEADER_SIZE + 4;
pub const FACET_SIZE: usize = 50;

const VEC3_SIZE: usize = 12;
const ATTRIBUTE_OFFSET: usize = 4 * VEC3_SIZE;

/// Decodes a binary STL buffer. Canonical files hold exactly one solid; what happens to bytes
/// after it depends on `options.trailing_data`.
pub fn decode(bytes: &[u8], options: &ParseOptions) -> Result<Vec<Solid>, StlParsingError> {
    let mut solids = Vec::new();
    let mut offset = 0;

    loop {
        let (solid, end) = decode_solid(bytes, offset)?;
        solids
            .try_push(solid)
            .map_err(|err| allocation_failure(offset, err))?;
        offset = end;

        let remaining_bytes = bytes.len() - offset;
        if remaining_bytes == 0 {
            break;
        }
        match options.trailing_data {
            TrailingData::NextSolid if remaining_bytes >= SOLID_HEADER_SIZE => continue,
            TrailingData::Reject => {
                return StlParsingErrorDetail::TrailingBytes {
                    count: remaining_bytes,
                }
                .pipe(|detail| StlParsingError::at_offset(offset, detail))
                .pipe(Err);
            }
            TrailingData::Ignore | TrailingData::NextSolid => {
                warn!(
                    "Ignored {remaining_bytes} trailing bytes after offset {offset} in binary STL data"
                );
                break;
            }
        }
    }

    Ok(solids)
}

/// Decodes the solid starting at `offset` and returns it with the offset right after it.
fn decode_solid(bytes: &[u8], offset: usize) -> Result<(Solid, usize), StlParsingError> {
    let solid_bytes = &bytes[offset..];
    if solid_bytes.len() < SOLID_HEADER_SIZE {
        return StlParsingErrorDetail::MalformedHeader {
            remaining_bytes: solid_bytes.len(),
        }
        .pipe(|detail| StlParsingError::at_offset(offset, detail))
        .pipe(Err);
    }

    let (header, rest) = solid_bytes.split_at(HEADER_SIZE);
    let (facet_count, facet_bytes) = rest.split_at(SOLID_HEADER_SIZE - HEADER_SIZE);
    let facet_count =
        u32::from_le_bytes([facet_count[0], facet_count[1], facet_count[2], facet_count[3]]);
    let facets_offset = offset + SOLID_HEADER_SIZE;

    let required_bytes = u64::from(facet_count) * FACET_SIZE as u64;
    if (facet_bytes.len() as u64) < required_bytes {
        return StlParsingErrorDetail::MalformedFacetCount {
            facet_count,
            required_bytes,
            remaining_bytes: facet_bytes.len(),
        }
        .pipe(|detail| StlParsingError::at_offset(facets_offset, detail))
        .pipe(Err);
    }
    // Fits in usize: it is no larger than a slice length.
    let facet_bytes = &facet_bytes[..required_bytes as usize];

    let mut facets = Vec::new();
    facets
        .try_reserve_exact(facet_count as usize)
        .map_err(|err| allocation_failure(facets_offset, err))?;
    facets.extend(facet_bytes.chunks_exact(FACET_SIZE).map(decode_facet));

    let solid = Solid::new(header, facets);
    Ok((solid, facets_offset + facet_bytes.len()))
}

fn allocation_failure(offset: usize, err: TryReserveError) -> StlParsingError {
    StlParsingError::at_offset(offset, StlParsingErrorDetail::AllocationFailure(err))
}

fn decode_facet(record: &[u8]) -> Facet {
    let normal = read_vec3(record, 0);
    let vertices = [1, 2, 3].map(|i| read_vec3(record, i * VEC3_SIZE));
    let attribute = u16::from_le_bytes([record[ATTRIBUTE_OFFSET], record[ATTRIBUTE_OFFSET + 1]]);
    Facet::new(normal, vertices, attribute)
}

fn read_vec3(record: &[u8], offset: usize) -> Vec3 {
    [0, 1, 2].map(|i| read_f32(record, offset + i * 4))
}

fn read_f32(record: &[u8], offset: usize) -> f32 {
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&record[offset..offset + 4]);
    f32::from_le_bytes(bytes)
}
