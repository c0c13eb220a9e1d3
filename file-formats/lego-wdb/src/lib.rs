//! Parser and exporter for LEGO Island WORLD.WDB asset containers.
//!
//! A WDB file holds one or more worlds, each a collection of part and model
//! records. Every record embeds an opaque render-object-info (ROI) blob
//! referenced by a length and an absolute file offset; the blob in turn
//! contains palette-indexed texture images behind a blob-relative pointer.
//! This crate decodes the container, the embedded blobs and the images, and
//! can re-materialize a file as a directory tree of raw blobs, raster
//! images and JSON metadata.
//!
//! # Examples
//!
//! ```no_run
//! use lego_wdb::{ExportOptions, export_world, parse_wdb_file};
//!
//! # fn main() -> lego_wdb::Result<()> {
//! let wdb = parse_wdb_file("WORLD.WDB")?;
//! for world in &wdb.worlds {
//!     let summary = export_world("out".as_ref(), world, &ExportOptions::default())?;
//!     println!("{} textures written", summary.textures);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod export;
pub mod parser;
pub mod reader;
pub mod roi;
pub mod texture;
pub mod types;

pub use error::{Result, WdbError};
pub use export::{CollisionPolicy, ExportOptions, ExportSummary, export_world};
pub use parser::{parse_wdb, parse_wdb_file};
pub use roi::{ROI_VERSION, RoiEntry, RoiList, Texture, TextureInfo, parse_roi_list};
pub use texture::{LegoImage, RgbColor};
pub use types::{Model, Part, Vec3, WdbFile, World, strip_padding};
