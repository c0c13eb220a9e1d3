//! Export of decoded worlds to a directory tree
//!
//! Each world becomes `<root>/WDB/<worldName>/` holding the raw ROI blobs,
//! a JSON metadata document per model and the model textures as raster
//! images. Directory creation is idempotent and re-running an export over
//! the same tree rewrites identical content.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, warn};
use serde::Serialize;

use crate::error::{Result, WdbError};
use crate::roi::parse_roi_list;
use crate::types::{Model, Part, Vec3, World, strip_padding};

/// How to handle two entities mapping to the same output path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Log a warning and let the last write win
    #[default]
    Overwrite,
    /// Abort the export with [`WdbError::NameCollision`]
    Error,
}

/// Options controlling an export run
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Name-collision policy; see [`CollisionPolicy`]
    pub collision: CollisionPolicy,
}

/// Counts of artifacts written by [`export_world`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Models exported
    pub models: usize,
    /// Parts exported
    pub parts: usize,
    /// Texture images written
    pub textures: usize,
}

/// Metadata document written next to each model's raw blob
///
/// Field names match the on-disk JSON layout exactly.
#[derive(Serialize)]
struct ModelMetadata<'a> {
    #[serde(rename = "PresenterName")]
    presenter_name: &'a str,
    #[serde(rename = "Location")]
    location: Vec3,
    #[serde(rename = "Direction")]
    direction: Vec3,
    #[serde(rename = "Up")]
    up: Vec3,
    #[serde(rename = "Visibility")]
    visibility: bool,
}

/// Tracks every path written in one export run so collisions between
/// same-named entities are detected deterministically, not by overwrite
/// order.
struct PathClaims {
    seen: HashSet<PathBuf>,
    policy: CollisionPolicy,
}

impl PathClaims {
    fn new(policy: CollisionPolicy) -> Self {
        Self {
            seen: HashSet::new(),
            policy,
        }
    }

    fn claim(&mut self, path: &Path) -> Result<()> {
        if !self.seen.insert(path.to_owned()) {
            match self.policy {
                CollisionPolicy::Error => {
                    return Err(WdbError::NameCollision {
                        path: path.to_owned(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    warn!(
                        "output path {} written more than once, last write wins",
                        path.display()
                    );
                }
            }
        }
        Ok(())
    }
}

/// Export one decoded world under `root`
///
/// Produces `WDB/<worldName>/models/...` and `WDB/<worldName>/parts/...`
/// as described in the crate documentation. Pre-existing directories are
/// fine; files are overwritten subject to the collision policy.
pub fn export_world(root: &Path, world: &World, options: &ExportOptions) -> Result<ExportSummary> {
    let world_root = root.join("WDB").join(strip_padding(&world.name));
    let mut claims = PathClaims::new(options.collision);
    let mut summary = ExportSummary::default();

    for model in &world.models {
        export_model(&world_root, model, &mut claims, &mut summary)?;
    }
    for part in &world.parts {
        export_part(&world_root, part, &mut claims, &mut summary)?;
    }

    debug!(
        "exported world '{}': {} models, {} parts, {} textures",
        strip_padding(&world.name),
        summary.models,
        summary.parts,
        summary.textures
    );
    Ok(summary)
}

fn export_model(
    world_root: &Path,
    model: &Model,
    claims: &mut PathClaims,
    summary: &mut ExportSummary,
) -> Result<()> {
    let name = strip_padding(&model.name);
    let roi = parse_roi_list(&model.data)
        .map_err(|e| e.with_context(&format!("model '{name}' data")))?;

    let models_dir = world_root.join("models");
    let model_dir = models_dir.join(name);
    let texture_dir = model_dir.join("textures");
    let bin_path = models_dir.join(format!("{name}.bin"));
    let metadata_path = model_dir.join("extra.json");

    // Claim every output path before writing anything for this model, so
    // the strict policy aborts with the tree untouched by the collider
    claims.claim(&bin_path)?;
    claims.claim(&metadata_path)?;
    let texture_paths: Vec<PathBuf> = roi
        .texture_info
        .textures
        .iter()
        .map(|texture| texture_dir.join(strip_padding(&texture.name)))
        .collect();
    for path in &texture_paths {
        claims.claim(path)?;
    }

    create_dir_all(&texture_dir)?;
    write_file(&bin_path, &model.data)?;

    let metadata = ModelMetadata {
        presenter_name: strip_padding(&model.presenter_name),
        location: model.location,
        direction: model.direction,
        up: model.up,
        visibility: model.visibility,
    };
    write_file(&metadata_path, serde_json::to_string_pretty(&metadata)?.as_bytes())?;

    for (texture, path) in roi.texture_info.textures.iter().zip(&texture_paths) {
        let raster = texture.image.to_rgb_image()?;
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        raster.save_with_format(path, format)?;
        summary.textures += 1;
    }

    summary.models += 1;
    Ok(())
}

fn export_part(
    world_root: &Path,
    part: &Part,
    claims: &mut PathClaims,
    summary: &mut ExportSummary,
) -> Result<()> {
    let name = strip_padding(&part.roi_name);
    let parts_dir = world_root.join("parts");
    let bin_path = parts_dir.join(format!("{name}.bin"));

    claims.claim(&bin_path)?;
    create_dir_all(&parts_dir)?;
    write_file(&bin_path, &part.data)?;

    summary.parts += 1;
    Ok(())
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| WdbError::Io {
        path: path.to_owned(),
        source: e,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| WdbError::Io {
        path: path.to_owned(),
        source: e,
    })
}
