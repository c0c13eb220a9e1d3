//! Decoder for the render-object-info blob embedded in models and parts
//!
//! The blob is a self-contained buffer: its texture-info pointer is an
//! offset from the blob start, not from the top-level file. Decoding
//! therefore runs on a fresh [`Cursor`] scoped to the blob, reusing the same
//! pointer-resolution primitive as the container grammar.

use log::debug;

use crate::error::{Result, WdbError};
use crate::reader::Cursor;
use crate::texture::LegoImage;

/// The only ROI content revision this library understands
pub const ROI_VERSION: u32 = 19;

/// The decoded contents of a model's or part's data blob
#[derive(Debug, Clone, PartialEq)]
pub struct RoiList {
    /// Content revision, always [`ROI_VERSION`]
    pub version: u32,
    /// Texture block, resolved through the blob-relative pointer
    pub texture_info: TextureInfo,
    /// Named sub-object descriptors in blob order
    pub entries: Vec<RoiEntry>,
}

/// A named sub-object descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct RoiEntry {
    /// Sub-object name, possibly NUL-padded
    pub name: String,
    /// Number of levels of detail
    pub num_lods: u32,
    /// LOD reference value
    pub lods: u32,
}

/// The texture block of a ROI blob
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    /// Declared texture count
    pub num_textures: u32,
    /// When set, the texture sequence is empty regardless of the count.
    /// A deliberate format variant, not an error.
    pub skip_textures: bool,
    /// Decoded textures; empty when `skip_textures` is set
    pub textures: Vec<Texture>,
}

/// A named texture with its embedded image
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Texture name, possibly NUL-padded; used as the output file name
    pub name: String,
    /// The palette-indexed image
    pub image: LegoImage,
}

/// Decode a ROI blob
///
/// `input` is the model's or part's data region, treated as its own buffer
/// with offsets reset to zero at its start.
pub fn parse_roi_list(input: &[u8]) -> Result<RoiList> {
    let mut cursor = Cursor::new(input);

    let version = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("RoiList.Version"))?;
    if version != ROI_VERSION {
        return Err(WdbError::VersionMismatch {
            expected: ROI_VERSION,
            found: version,
        });
    }

    let texture_info_offset = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("RoiList.TextureInfoOffset"))?;
    let texture_info = cursor
        .resolve_pointer(texture_info_offset as usize, parse_texture_info)
        .map_err(|e| e.with_context("RoiList.TextureInfo"))?;

    let num_rois = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("RoiList.NumROIs"))?;
    let mut entries = Vec::new();
    for i in 0..num_rois {
        entries
            .push(parse_roi_entry(&mut cursor).map_err(|e| e.with_context(&format!("ROI {i}")))?);
    }

    debug!(
        "decoded ROI blob: {} textures, {} entries",
        texture_info.textures.len(),
        entries.len()
    );

    Ok(RoiList {
        version,
        texture_info,
        entries,
    })
}

fn parse_roi_entry(cursor: &mut Cursor<'_>) -> Result<RoiEntry> {
    let name = cursor
        .read_string_u32()
        .map_err(|e| e.with_context("ROI.RoiName"))?;
    let num_lods = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("ROI.NumLODs"))?;
    let lods = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("ROI.LODs"))?;
    Ok(RoiEntry {
        name,
        num_lods,
        lods,
    })
}

fn parse_texture_info(cursor: &mut Cursor<'_>) -> Result<TextureInfo> {
    let num_textures = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("TextureInfo.NumTextures"))?;
    let skip_raw = cursor
        .read_u32_le()
        .map_err(|e| e.with_context("TextureInfo.SkipTextures"))?;
    let skip_textures = skip_raw == 1;

    let mut textures = Vec::new();
    if !skip_textures {
        for i in 0..num_textures {
            textures.push(
                parse_texture(cursor).map_err(|e| e.with_context(&format!("Texture {i}")))?,
            );
        }
    }

    Ok(TextureInfo {
        num_textures,
        skip_textures,
        textures,
    })
}

fn parse_texture(cursor: &mut Cursor<'_>) -> Result<Texture> {
    let name = cursor
        .read_string_u32()
        .map_err(|e| e.with_context("Texture.Name"))?;
    let image = LegoImage::parse(cursor).map_err(|e| e.with_context("Texture.Image"))?;
    Ok(Texture { name, image })
}
