//! Hex Map Demo
//!
//! Run with: `cargo run --bin hex-map -- [config.json] [--noise-dir DIR]`
//!
//! Builds a map from a JSON grid config (or the defaults), triangulates every
//! chunk, raises a ridge across the middle, rebuilds only the touched chunks
//! and finds a path from one corner to the other.
//!
//! With `--noise-dir`, noise fields are stored as PNG files and reused on the
//! next run.

use std::path::PathBuf;
use std::process;

use hex_terrain_engine::{
    GridConfig, HexCoordinates, HexGrid, NoiseCache, NoiseStore, Pathfinder, Triangulator,
    pathfinding::path_cost,
};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    noise_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--noise-dir" => {
                let dir = iter.next().ok_or("--noise-dir needs a directory")?;
                args.noise_dir = Some(PathBuf::from(dir));
            }
            "-h" | "--help" => {
                return Err("usage: hex-map [config.json] [--noise-dir DIR]".to_string());
            }
            path if args.config.is_none() => args.config = Some(PathBuf::from(path)),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }
    Ok(args)
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("[hex-map] {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            println!("[hex-map] Loading config from {}", path.display());
            GridConfig::from_json_file(path)?
        }
        None => GridConfig::default(),
    };

    let mut noise = match args.noise_dir {
        Some(dir) => NoiseCache::with_store(NoiseStore::new(dir)),
        None => NoiseCache::new(),
    };

    let mut grid = HexGrid::new(&config, &mut noise)?;
    let triangulator = Triangulator::for_grid(&grid);

    let meshes = triangulator.rebuild_dirty(&mut grid);
    let vertices: usize = meshes.iter().map(|m| m.buffers.vertices.len()).sum();
    println!(
        "[hex-map] Initial build: {} chunks, {} vertices",
        meshes.len(),
        vertices
    );

    // Raise a ridge along the middle row, leaving a one-cell pass at the east end.
    let ridge_row = (grid.height() / 2) as i32;
    let mut raised = 0;
    for x in 0..grid.width() as i32 - 1 {
        if let Some(id) = grid.cell_id_at(HexCoordinates::from_offset(x, ridge_row)) {
            if grid.set_elevation(id, grid.metrics().elevation_max) {
                raised += 1;
            }
        }
    }
    let rebuilt = triangulator.rebuild_dirty(&mut grid);
    println!(
        "[hex-map] Raised {} cells, rebuilt chunks {:?}",
        raised,
        rebuilt.iter().map(|m| m.chunk).collect::<Vec<_>>()
    );

    let from = 0;
    let to = grid.cell_count() - 1;
    let path = Pathfinder::new().find_path(&mut grid, from, to);
    if path.is_empty() {
        println!(
            "[hex-map] No path from {} to {}",
            grid.cell(from).coordinates(),
            grid.cell(to).coordinates()
        );
    } else {
        println!(
            "[hex-map] Path from {} to {}: {} steps, cost {}",
            grid.cell(from).coordinates(),
            grid.cell(to).coordinates(),
            path.len(),
            path_cost(&grid, from, &path)
        );
    }

    Ok(())
}
