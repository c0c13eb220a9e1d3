//! Decoder for the top-level WDB container
//!
//! The container is a sequential record stream with pointer-resolved data
//! regions: part and model records carry a length and an absolute offset
//! into the file, and the referenced bytes hold the entity's ROI blob.
//! Decoding is strict — a count or range the buffer cannot satisfy fails the
//! whole file, since a pointer-laden layout cannot be safely resumed after
//! corruption.

use std::path::Path;

use log::debug;

use crate::error::{Result, WdbError};
use crate::reader::Cursor;
use crate::types::{Model, Part, WdbFile, World, strip_padding};

/// Parse a WDB container from an in-memory buffer
pub fn parse_wdb(input: &[u8]) -> Result<WdbFile> {
    let mut cursor = Cursor::new(input);

    let world_count = cursor
        .read_i32_le()
        .map_err(|e| e.with_context("NumWorlds"))?;
    if world_count < 0 {
        return Err(WdbError::NegativeLength {
            field: "NumWorlds",
            value: world_count,
        });
    }

    let mut worlds = Vec::new();
    for i in 0..world_count {
        worlds.push(parse_world(&mut cursor).map_err(|e| e.with_context(&format!("World {i}")))?);
    }

    debug!("decoded {} worlds", worlds.len());
    Ok(WdbFile { worlds })
}

/// Read a WDB file from the file system and parse it
pub fn parse_wdb_file<P: AsRef<Path>>(path: P) -> Result<WdbFile> {
    let input = std::fs::read(&path).map_err(|e| WdbError::Io {
        path: path.as_ref().to_owned(),
        source: e,
    })?;
    parse_wdb(&input)
}

fn parse_world(cursor: &mut Cursor<'_>) -> Result<World> {
    let name = cursor
        .read_string_i32()
        .map_err(|e| e.with_context("World.Name"))?;

    let part_count = cursor
        .read_i32_le()
        .map_err(|e| e.with_context("World.NumParts"))?;
    if part_count < 0 {
        return Err(WdbError::NegativeLength {
            field: "World.NumParts",
            value: part_count,
        });
    }
    let mut parts = Vec::new();
    for i in 0..part_count {
        parts.push(parse_part(cursor).map_err(|e| e.with_context(&format!("Part {i}")))?);
    }

    let model_count = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("World.NumModels"))?;
    let mut models = Vec::new();
    for i in 0..model_count {
        models.push(parse_model(cursor).map_err(|e| e.with_context(&format!("Model {i}")))?);
    }

    debug!(
        "decoded world '{}': {} parts, {} models",
        strip_padding(&name),
        parts.len(),
        models.len()
    );

    Ok(World {
        name,
        parts,
        models,
    })
}

fn parse_part(cursor: &mut Cursor<'_>) -> Result<Part> {
    let roi_name = cursor
        .read_string_u32()
        .map_err(|e| e.with_context("Part.RoiName"))?;

    let data_length = cursor
        .read_i32_le()
        .map_err(|e| e.with_context("Part.DataLength"))?;
    if data_length < 0 {
        return Err(WdbError::NegativeLength {
            field: "Part.DataLength",
            value: data_length,
        });
    }
    let data_offset = cursor
        .read_i32_le()
        .map_err(|e| e.with_context("Part.DataOffset"))?;
    if data_offset < 0 {
        return Err(WdbError::NegativeLength {
            field: "Part.DataOffset",
            value: data_offset,
        });
    }

    let data = cursor
        .resolve_pointer(data_offset as usize, |c| c.read_bytes(data_length as usize))
        .map_err(|e| e.with_context("Part.Data"))?;

    Ok(Part { roi_name, data })
}

fn parse_model(cursor: &mut Cursor<'_>) -> Result<Model> {
    let name = cursor
        .read_string_u32()
        .map_err(|e| e.with_context("Model.Name"))?;

    let data_length = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("Model.DataLength"))?;
    let data_offset = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("Model.DataOffset"))?;
    let data = cursor
        .resolve_pointer(data_offset as usize, |c| c.read_bytes(data_length as usize))
        .map_err(|e| e.with_context("Model.Data"))?;

    let presenter_name = cursor
        .read_string_u32()
        .map_err(|e| e.with_context("Model.PresenterName"))?;
    let location = cursor
        .read_vec3()
        .map_err(|e| e.with_context("Model.Location"))?;
    let direction = cursor
        .read_vec3()
        .map_err(|e| e.with_context("Model.Direction"))?;
    let up = cursor.read_vec3().map_err(|e| e.with_context("Model.Up"))?;
    let visibility = cursor
        .read_u8()
        .map_err(|e| e.with_context("Model.Visibility"))?
        != 0;

    Ok(Model {
        name,
        data,
        presenter_name,
        location,
        direction,
        up,
        visibility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn push_u32(out: &mut Vec<u8>, value: u32) {
        out.extend_from_slice(&value.to_le_bytes());
    }

    fn push_i32(out: &mut Vec<u8>, value: i32) {
        out.extend_from_slice(&value.to_le_bytes());
    }

    fn push_string_u32(out: &mut Vec<u8>, value: &str) {
        push_u32(out, value.len() as u32);
        out.extend_from_slice(value.as_bytes());
    }

    fn push_string_i32(out: &mut Vec<u8>, value: &str) {
        push_i32(out, value.len() as i32);
        out.extend_from_slice(value.as_bytes());
    }

    fn push_vec3(out: &mut Vec<u8>, value: [f32; 3]) {
        for component in value {
            out.extend_from_slice(&component.to_le_bytes());
        }
    }

    /// One world, one part and one model sharing a 4-byte data region
    /// appended after the records.
    fn minimal_file() -> Vec<u8> {
        // The record section is built first so the data region's absolute
        // offset is known; the blob goes at the very end.
        let mut records = vec![];
        push_i32(&mut records, 1); // NumWorlds
        push_string_i32(&mut records, "ISLE\0");
        push_i32(&mut records, 1); // NumParts

        // Part, with its data offset patched below
        push_string_u32(&mut records, "chtire\0");
        let part_range_at = records.len();
        push_i32(&mut records, 4);
        push_i32(&mut records, 0);

        push_u32(&mut records, 1); // NumModels
        push_string_u32(&mut records, "bike\0");
        let model_range_at = records.len();
        push_u32(&mut records, 4);
        push_u32(&mut records, 0);
        push_string_u32(&mut records, "LegoAnimPresenter\0");
        push_vec3(&mut records, [1.0, 2.0, 3.0]);
        push_vec3(&mut records, [0.0, 0.0, 1.0]);
        push_vec3(&mut records, [0.0, 1.0, 0.0]);
        records.push(1); // Visibility

        let data_offset = records.len() as u32;
        records[part_range_at + 4..part_range_at + 8]
            .copy_from_slice(&data_offset.to_le_bytes());
        records[model_range_at + 4..model_range_at + 8]
            .copy_from_slice(&data_offset.to_le_bytes());
        records.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        records
    }

    #[test]
    fn test_parse_minimal_file() {
        let file = minimal_file();
        let wdb = parse_wdb(&file).unwrap();

        assert_eq!(wdb.worlds.len(), 1);
        let world = &wdb.worlds[0];
        assert_eq!(world.name, "ISLE\0");
        assert_eq!(world.parts.len(), 1);
        assert_eq!(world.models.len(), 1);

        let part = &world.parts[0];
        assert_eq!(part.roi_name, "chtire\0");
        assert_eq!(part.data, vec![0xde, 0xad, 0xbe, 0xef]);

        let model = &world.models[0];
        assert_eq!(model.name, "bike\0");
        assert_eq!(model.data, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(model.presenter_name, "LegoAnimPresenter\0");
        assert_eq!(model.location, [1.0, 2.0, 3.0]);
        assert_eq!(model.direction, [0.0, 0.0, 1.0]);
        assert_eq!(model.up, [0.0, 1.0, 0.0]);
        assert!(model.visibility);
    }

    #[test]
    fn test_declared_counts_match_decoded_lengths() {
        let file = minimal_file();
        let wdb = parse_wdb(&file).unwrap();
        let parts: usize = wdb.worlds.iter().map(|w| w.parts.len()).sum();
        let models: usize = wdb.worlds.iter().map(|w| w.models.len()).sum();
        assert_eq!(parts, 1);
        assert_eq!(models, 1);
    }

    #[test]
    fn test_empty_file_with_zero_worlds() {
        let mut file = vec![];
        push_i32(&mut file, 0);
        let wdb = parse_wdb(&file).unwrap();
        assert!(wdb.worlds.is_empty());
    }

    #[test]
    fn test_negative_world_count() {
        let mut file = vec![];
        push_i32(&mut file, -1);
        assert!(matches!(
            parse_wdb(&file),
            Err(WdbError::NegativeLength {
                field: "NumWorlds",
                value: -1
            })
        ));
    }

    #[test]
    fn test_data_range_past_end_of_file() {
        let mut file = vec![];
        push_i32(&mut file, 1);
        push_string_i32(&mut file, "W");
        push_i32(&mut file, 1); // one part
        push_string_u32(&mut file, "p");
        let len = file.len() as i32;
        push_i32(&mut file, 100); // DataLength
        push_i32(&mut file, len); // DataOffset: in bounds, but offset+length is not
        assert!(parse_wdb(&file).is_err());
    }

    #[test]
    fn test_truncated_model_record() {
        let mut file = vec![];
        push_i32(&mut file, 1);
        push_string_i32(&mut file, "W");
        push_i32(&mut file, 0); // no parts
        push_u32(&mut file, 1); // one model, but nothing follows
        assert!(parse_wdb(&file).is_err());
    }

    #[test]
    fn test_world_count_exceeding_buffer() {
        let mut file = vec![];
        push_i32(&mut file, 3); // three worlds declared, none present
        assert!(parse_wdb(&file).is_err());
    }
}
