//! `world-names` command: print the name of every world

use std::path::Path;

use anyhow::{Context, Result};

use lego_wdb::{parse_wdb_file, strip_padding};

pub fn execute(path: &Path) -> Result<()> {
    let wdb = parse_wdb_file(path)
        .with_context(|| format!("Failed to parse WDB file: {}", path.display()))?;

    for world in &wdb.worlds {
        println!("{}", strip_padding(&world.name));
    }

    Ok(())
}
