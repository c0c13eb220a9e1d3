//! `export` command: write every world to a directory tree

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use lego_wdb::{CollisionPolicy, ExportOptions, export_world, parse_wdb_file, strip_padding};

pub fn execute(file: &Path, output: &Path, strict: bool) -> Result<()> {
    let wdb = parse_wdb_file(file)
        .with_context(|| format!("Failed to parse WDB file: {}", file.display()))?;

    let options = ExportOptions {
        collision: if strict {
            CollisionPolicy::Error
        } else {
            CollisionPolicy::Overwrite
        },
    };

    for world in &wdb.worlds {
        let name = strip_padding(&world.name);
        let summary = export_world(output, world, &options)
            .with_context(|| format!("Failed to export world '{name}'"))?;
        println!(
            "✓ {}: {} models, {} parts, {} textures",
            style(name).cyan(),
            style(summary.models).green(),
            style(summary.parts).green(),
            style(summary.textures).green()
        );
    }

    Ok(())
}
