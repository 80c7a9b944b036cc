//! Walk through one drag-release cycle on a small scene.
//!
//! Usage:
//!   cargo run -p tilesnap --example snap_walkthrough -- [none|horizontal|vertical|radial]
//!
//! Places two squares, mirrors them, snaps the second onto the first,
//! regenerates its mirrors and prints the suggestions that follow.

use tilesnap::prelude::*;

fn main() {
    let mode = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "radial".to_string());
    let mode: SymmetryMode = match mode.parse() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: snap_walkthrough [none|horizontal|vertical|radial]");
            return;
        }
    };
    let center = Bounds2::default().center();
    let mut tiles = vec![
        Tile::new(TileId(0), ShapeKind::Square, Vector2::new(200.0, 150.0)),
        Tile::new(TileId(1), ShapeKind::Square, Vector2::new(262.0, 158.0)),
    ];
    let mut ids = TileIds::after(&tiles);
    regenerate_all(&mut tiles, mode, center, &mut ids);
    println!("{} tiles after mirroring ({mode})", tiles.len());

    let moving = tiles[1].clone();
    match resolve_among(&moving, &tiles, &SnapCfg::default()) {
        Some(won) => {
            println!(
                "tile {} snaps to {} at ({:.1}, {:.1}), edge gap {:.2}",
                moving.id, won.target, won.snap.position.x, won.snap.position.y, won.snap.distance
            );
            tiles[1].pos = won.snap.position;
            regenerate_mirrors(&mut tiles, moving.id, mode, center, &mut ids);
        }
        None => println!("tile {} has nothing to snap to", moving.id),
    }

    for s in synthesize(&tiles, true, &SuggestCfg::default()) {
        println!("suggest {:<8} at ({:.1}, {:.1})", s.shape, s.pos.x, s.pos.y);
    }
}
