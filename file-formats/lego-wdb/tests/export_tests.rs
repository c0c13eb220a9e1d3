//! End-to-end tests: synthetic WDB buffers through parse and export

use std::path::Path;

use lego_wdb::{CollisionPolicy, ExportOptions, ROI_VERSION, export_world, parse_wdb};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

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

/// A ROI blob with one named 1x1 single-color texture and no sub-objects
fn roi_blob(texture_name: &str) -> Vec<u8> {
    let mut blob = vec![];
    push_u32(&mut blob, ROI_VERSION);
    push_u32(&mut blob, 12); // TextureInfo directly after NumROIs
    push_u32(&mut blob, 0); // NumROIs
    push_u32(&mut blob, 1); // NumTextures
    push_u32(&mut blob, 0); // SkipTextures
    push_string_u32(&mut blob, texture_name);
    push_u32(&mut blob, 1); // Width
    push_u32(&mut blob, 1); // Height
    push_u32(&mut blob, 1); // ColorCount
    blob.extend_from_slice(&[200, 100, 50]);
    blob.push(0);
    blob
}

/// One world with the given model names, all sharing a single ROI blob
/// appended after the records
fn wdb_with_models(world_name: &str, model_names: &[&str], blob: &[u8]) -> Vec<u8> {
    let mut records = vec![];
    push_i32(&mut records, 1); // NumWorlds
    push_string_i32(&mut records, world_name);
    push_i32(&mut records, 0); // NumParts
    push_u32(&mut records, model_names.len() as u32);

    let mut offset_fields = vec![];
    for name in model_names {
        push_string_u32(&mut records, name);
        push_u32(&mut records, blob.len() as u32);
        offset_fields.push(records.len());
        push_u32(&mut records, 0); // DataOffset, patched below
        push_string_u32(&mut records, "P");
        push_vec3(&mut records, [0.0, 0.0, 0.0]);
        push_vec3(&mut records, [0.0, 0.0, 1.0]);
        push_vec3(&mut records, [0.0, 1.0, 0.0]);
        records.push(1); // Visibility
    }

    let blob_offset = records.len() as u32;
    for at in offset_fields {
        records[at..at + 4].copy_from_slice(&blob_offset.to_le_bytes());
    }
    records.extend_from_slice(blob);
    records
}

#[test]
fn test_minimal_export_scenario() {
    let file = wdb_with_models("W", &["M"], &roi_blob("T"));
    let wdb = parse_wdb(&file).unwrap();

    let out = TempDir::new().unwrap();
    let summary = export_world(out.path(), &wdb.worlds[0], &ExportOptions::default()).unwrap();

    assert_eq!(summary.models, 1);
    assert_eq!(summary.parts, 0);
    assert_eq!(summary.textures, 1);

    let world_root = out.path().join("WDB").join("W");
    let bin = std::fs::read(world_root.join("models/M.bin")).unwrap();
    assert_eq!(bin, roi_blob("T"));

    let metadata: serde_json::Value =
        serde_json::from_slice(&std::fs::read(world_root.join("models/M/extra.json")).unwrap())
            .unwrap();
    assert_eq!(metadata["PresenterName"], "P");
    assert_eq!(metadata["Location"], serde_json::json!([0.0, 0.0, 0.0]));
    assert_eq!(metadata["Visibility"], true);

    // The texture file keeps its name verbatim; content is a 1x1 raster
    let texture_bytes = std::fs::read(world_root.join("models/M/textures/T")).unwrap();
    let raster = image::load_from_memory(&texture_bytes).unwrap();
    assert_eq!(raster.width(), 1);
    assert_eq!(raster.height(), 1);
    assert_eq!(raster.to_rgb8().get_pixel(0, 0).0, [200, 100, 50]);
}

#[test]
fn test_export_is_idempotent() {
    let file = wdb_with_models("W", &["M"], &roi_blob("T"));
    let wdb = parse_wdb(&file).unwrap();

    let out = TempDir::new().unwrap();
    let first = export_world(out.path(), &wdb.worlds[0], &ExportOptions::default()).unwrap();
    let second = export_world(out.path(), &wdb.worlds[0], &ExportOptions::default()).unwrap();
    assert_eq!(first, second);

    let bin = out.path().join("WDB/W/models/M.bin");
    assert_eq!(std::fs::read(bin).unwrap(), roi_blob("T"));
}

#[test]
fn test_padded_names_are_stripped_in_paths() {
    let file = wdb_with_models("W\0\0", &["M\0"], &roi_blob("T\0"));
    let wdb = parse_wdb(&file).unwrap();

    let out = TempDir::new().unwrap();
    export_world(out.path(), &wdb.worlds[0], &ExportOptions::default()).unwrap();

    assert!(out.path().join("WDB/W/models/M.bin").is_file());
    assert!(out.path().join("WDB/W/models/M/textures/T").is_file());
}

#[test]
fn test_collision_strict_aborts() {
    // Two models whose names collide after padding strip
    let file = wdb_with_models("W", &["M", "M\0"], &roi_blob("T"));
    let wdb = parse_wdb(&file).unwrap();

    let out = TempDir::new().unwrap();
    let options = ExportOptions {
        collision: CollisionPolicy::Error,
    };
    let result = export_world(out.path(), &wdb.worlds[0], &options);
    assert!(matches!(
        result,
        Err(lego_wdb::WdbError::NameCollision { .. })
    ));
}

#[test]
fn test_collision_lenient_last_write_wins() {
    let file = wdb_with_models("W", &["M", "M\0"], &roi_blob("T"));
    let wdb = parse_wdb(&file).unwrap();

    let out = TempDir::new().unwrap();
    let summary = export_world(out.path(), &wdb.worlds[0], &ExportOptions::default()).unwrap();
    assert_eq!(summary.models, 2);
    assert!(out.path().join("WDB/W/models/M.bin").is_file());
}

#[test]
fn test_malformed_range_fails_before_any_output() {
    // dataOffset + dataLength exceeds the buffer
    let mut file = vec![];
    push_i32(&mut file, 1);
    push_string_i32(&mut file, "W");
    push_i32(&mut file, 0);
    push_u32(&mut file, 1);
    push_string_u32(&mut file, "M");
    push_u32(&mut file, 1000); // DataLength far past the end
    push_u32(&mut file, 4); // DataOffset
    assert!(parse_wdb(&file).is_err());

    // The decode failed, so an export run never starts and the output
    // tree stays empty
    let out = TempDir::new().unwrap();
    assert!(!out.path().join("WDB").exists());
    assert!(is_empty_dir(out.path()));
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).map(|mut d| d.next().is_none()).unwrap_or(false)
}
