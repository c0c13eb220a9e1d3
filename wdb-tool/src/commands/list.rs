//! `list` command: print the decoded structure of a WDB file

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use lego_wdb::{parse_roi_list, parse_wdb_file, strip_padding};

pub fn execute(path: &Path) -> Result<()> {
    let wdb = parse_wdb_file(path)
        .with_context(|| format!("Failed to parse WDB file: {}", path.display()))?;

    println!("\n{}", style("WDB File Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Worlds: {}", style(wdb.worlds.len()).green());

    for world in &wdb.worlds {
        println!(
            "\n{} {}",
            style("World").bold(),
            style(strip_padding(&world.name)).cyan()
        );

        println!("  Parts: {}", style(world.parts.len()).green());
        for part in &world.parts {
            println!(
                "    {} ({} bytes)",
                strip_padding(&part.roi_name),
                part.data.len()
            );
        }

        println!("  Models: {}", style(world.models.len()).green());
        for model in &world.models {
            println!(
                "    {} ({} bytes, presenter {}, {})",
                strip_padding(&model.name),
                model.data.len(),
                strip_padding(&model.presenter_name),
                if model.visibility {
                    "visible"
                } else {
                    "hidden"
                }
            );
            println!(
                "      location [{:.2}, {:.2}, {:.2}]",
                model.location[0], model.location[1], model.location[2]
            );

            let roi = parse_roi_list(&model.data).with_context(|| {
                format!("Failed to decode ROI blob of model '{}'", strip_padding(&model.name))
            })?;
            println!(
                "      ROI v{}: {} sub-objects, {} textures{}",
                roi.version,
                roi.entries.len(),
                roi.texture_info.textures.len(),
                if roi.texture_info.skip_textures {
                    " (skipped)"
                } else {
                    ""
                }
            );
            for texture in &roi.texture_info.textures {
                println!(
                    "        {} ({}x{}, {} colors)",
                    strip_padding(&texture.name),
                    texture.image.width,
                    texture.image.height,
                    texture.image.color_count()
                );
            }
        }
    }

    Ok(())
}
