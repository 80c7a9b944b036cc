use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

use tilesnap::prelude::*;

mod config;
mod provenance;
mod scene;

use config::Tolerances;
use provenance::Payload;
use scene::Scene;

#[derive(Parser)]
#[command(name = "tilesnap-cli")]
#[command(about = "Snap, mirror and extend polygon tile scenes")]
struct Cmd {
    /// JSON file overriding snap and suggestion tolerances
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write the edge table of every tile
    Edges {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "edges.csv")]
        out: PathBuf,
    },
    /// Snap one tile onto its nearest compatible neighbor and refresh its mirrors
    Snap {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        tile: u64,
        /// Mirror mode for the tile (default: the mode its current mirrors imply)
        #[arg(long)]
        symmetry: Option<SymmetryMode>,
        /// Symmetry center as `x,y` (default: implied by current mirrors, else canvas center)
        #[arg(long, value_parser = parse_center)]
        center: Option<Point>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Rebuild every mirror set under a symmetry mode
    Mirror {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        mode: SymmetryMode,
        #[arg(long, value_parser = parse_center)]
        center: Option<Point>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write suggested placements along exposed edges
    Suggest {
        #[arg(long)]
        input: PathBuf,
        /// Suggestion mode off (writes an empty table)
        #[arg(long)]
        disabled: bool,
        #[arg(long, default_value = "suggestions.csv")]
        out: PathBuf,
    },
    /// Sample a reproducible random scene
    Demo {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 12)]
        count: usize,
        #[arg(long, default_value = "none")]
        symmetry: SymmetryMode,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tol = Tolerances::load(cmd.config.as_deref())?;
    match cmd.action {
        Action::Edges { input, out } => edges(input, out),
        Action::Snap {
            input,
            tile,
            symmetry,
            center,
            out,
        } => snap(&tol, input, TileId(tile), symmetry, center, out),
        Action::Mirror {
            input,
            mode,
            center,
            out,
        } => mirror(input, mode, center, out),
        Action::Suggest {
            input,
            disabled,
            out,
        } => suggest(&tol, input, !disabled, out),
        Action::Demo {
            seed,
            index,
            count,
            symmetry,
            out,
        } => demo(seed, index, count, symmetry, out),
        Action::Report => report(&tol),
    }
}

fn parse_center(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| format!("bad coordinate {v:?} in {s:?}"))
    };
    Ok(Vector2::new(coord(x)?, coord(y)?))
}

fn edges(input: PathBuf, out: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "edges");
    let scene = scene::read_scene(&input)?;
    let mut df = scene::edge_frame(&scene.tiles)?;
    scene::write_table(&out, &mut df)?;
    tracing::info!(tiles = scene.tiles.len(), edges = df.height(), "edges_written");
    provenance::write_sidecar(&out, Payload::new("edges", json!({})).with_input(&input))?;
    Ok(())
}

fn snap(
    tol: &Tolerances,
    input: PathBuf,
    id: TileId,
    mode: Option<SymmetryMode>,
    center: Option<Point>,
    out: PathBuf,
) -> Result<()> {
    tracing::info!(input = %input.display(), tile = %id, mode = ?mode, "snap");
    let Scene { bounds, mut tiles } = scene::read_scene(&input)?;
    let at = tiles
        .iter()
        .position(|t| t.id == id)
        .with_context(|| format!("no tile with id {id} in {}", input.display()))?;
    if let Some(primary) = tiles[at].mirror_of {
        bail!("tile {id} is a mirror of {primary}; snap the primary instead");
    }
    let (implied, implied_center) = infer_symmetry(&tiles, id, bounds.center());
    let mode = mode.unwrap_or(implied);
    let center = center.unwrap_or(implied_center);

    let won = resolve_among(&tiles[at], &tiles, &tol.snap);
    match won {
        Some(w) => {
            tracing::info!(
                target_tile = %w.target,
                x = w.snap.position.x,
                y = w.snap.position.y,
                distance = w.snap.distance,
                "snapped"
            );
            tiles[at].pos = w.snap.position;
        }
        None => tracing::info!("no compatible edge in reach; tile left in place"),
    }

    let mut ids = TileIds::after(&tiles);
    let mirrors = regenerate_mirrors(&mut tiles, id, mode, center, &mut ids);
    tracing::info!(mirrors, %mode, "mirrors_regenerated");

    scene::write_scene(&out, &Scene { bounds, tiles })?;
    let params = json!({
        "tile": id.0,
        "symmetry": mode.name(),
        "center": [center.x, center.y],
        "snapped_to": won.map(|w| w.target.0),
        "tolerances": tol,
    });
    provenance::write_sidecar(&out, Payload::new("snap", params).with_input(&input))?;
    Ok(())
}

fn mirror(input: PathBuf, mode: SymmetryMode, center: Option<Point>, out: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), %mode, "mirror");
    let Scene { bounds, mut tiles } = scene::read_scene(&input)?;
    let center = center.unwrap_or_else(|| bounds.center());
    let mut ids = TileIds::after(&tiles);
    regenerate_all(&mut tiles, mode, center, &mut ids);
    let mirrors = tiles.iter().filter(|t| t.is_mirror()).count();
    tracing::info!(tiles = tiles.len(), mirrors, "mirrors_regenerated");

    scene::write_scene(&out, &Scene { bounds, tiles })?;
    let params = json!({ "mode": mode.name(), "center": [center.x, center.y] });
    provenance::write_sidecar(&out, Payload::new("mirror", params).with_input(&input))?;
    Ok(())
}

fn suggest(tol: &Tolerances, input: PathBuf, enabled: bool, out: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), enabled, "suggest");
    let scene = scene::read_scene(&input)?;
    let cfg = tol.suggest_on(scene.bounds);
    cfg.validate().context("invalid canvas")?;
    let suggestions = synthesize(&scene.tiles, enabled, &cfg);
    let mut df = scene::suggestion_frame(&suggestions)?;
    scene::write_table(&out, &mut df)?;
    tracing::info!(suggestions = suggestions.len(), "suggestions_written");
    let params = json!({ "enabled": enabled, "tolerances": tol });
    provenance::write_sidecar(&out, Payload::new("suggest", params).with_input(&input))?;
    Ok(())
}

fn demo(seed: u64, index: u64, count: usize, mode: SymmetryMode, out: PathBuf) -> Result<()> {
    tracing::info!(seed, index, count, %mode, "demo");
    let cfg = SceneCfg {
        count,
        ..SceneCfg::default()
    };
    let mut tiles = draw_scene(cfg, ReplayToken { seed, index });
    let mut ids = TileIds::after(&tiles);
    regenerate_all(&mut tiles, mode, cfg.bounds.center(), &mut ids);

    scene::write_scene(
        &out,
        &Scene {
            bounds: cfg.bounds,
            tiles,
        },
    )?;
    let params = json!({ "seed": seed, "index": index, "count": count, "symmetry": mode.name() });
    provenance::write_sidecar(&out, Payload::new("demo", params))?;
    Ok(())
}

fn report(tol: &Tolerances) -> Result<()> {
    let record = provenance::report(Payload::new("report", json!({ "tolerances": tol })));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_parses_pairs() {
        assert_eq!(parse_center("400,300").unwrap(), Vector2::new(400.0, 300.0));
        assert_eq!(parse_center(" 1.5 , -2 ").unwrap(), Vector2::new(1.5, -2.0));
        assert!(parse_center("400").is_err());
        assert!(parse_center("a,3").is_err());
        assert!(parse_center("inf,3").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn parses_snap_arguments() {
        let cmd = Cmd::try_parse_from([
            "tilesnap-cli",
            "snap",
            "--input",
            "a.json",
            "--tile",
            "3",
            "--symmetry",
            "radial",
            "--center",
            "10,20",
            "--out",
            "b.json",
        ])
        .unwrap();
        match cmd.action {
            Action::Snap {
                tile,
                symmetry,
                center,
                ..
            } => {
                assert_eq!(tile, 3);
                assert_eq!(symmetry, Some(SymmetryMode::Radial));
                assert_eq!(center, Some(Vector2::new(10.0, 20.0)));
            }
            _ => panic!("expected snap"),
        }
    }

    #[test]
    fn snap_command_moves_tile_and_writes_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let out = dir.path().join("out.json");
        std::fs::write(
            &input,
            r#"{"tiles":[{"id":0,"shape":"square","x":300,"y":300},
                {"id":1,"shape":"square","x":360,"y":300}]}"#,
        )
        .unwrap();
        let tol = Tolerances::default();
        snap(&tol, input, TileId(0), Some(SymmetryMode::Horizontal), None, out.clone()).unwrap();

        let scene = scene::read_scene(&out).unwrap();
        assert_eq!(scene.tiles.len(), 3);
        assert!((scene.tiles[0].pos.x - 309.0).abs() < 1e-9);
        let m = scene.tiles.iter().find(|t| t.mirror_of == Some(TileId(0))).unwrap();
        assert!((m.pos.x - (800.0 - 309.0)).abs() < 1e-9);
        assert!(dir.path().join("out.provenance.json").exists());
    }

    #[test]
    fn snap_without_symmetry_keeps_existing_mirror_set() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("radial.json");
        let out = dir.path().join("snapped.json");
        let center = Vector2::new(400.0, 300.0);
        let mut tiles = vec![
            Tile::new(TileId(0), ShapeKind::Square, Vector2::new(200.0, 150.0)),
            Tile::new(TileId(1), ShapeKind::Square, Vector2::new(262.0, 153.0)),
        ];
        let mut ids = TileIds::after(&tiles);
        regenerate_all(&mut tiles, SymmetryMode::Radial, center, &mut ids);
        let bounds = Bounds2::default();
        scene::write_scene(&input, &Scene { bounds, tiles }).unwrap();

        let cmd = Cmd::try_parse_from([
            "tilesnap-cli", "snap", "--input", "x.json", "--tile", "1", "--out", "y.json",
        ])
        .unwrap();
        let Action::Snap { symmetry, center: given, .. } = cmd.action else {
            panic!("expected snap");
        };
        assert_eq!((symmetry, given), (None, None));

        snap(&Tolerances::default(), input, TileId(1), symmetry, given, out.clone()).unwrap();
        let tiles = scene::read_scene(&out).unwrap().tiles;
        assert_eq!(tiles.len(), 8);
        for id in [TileId(0), TileId(1)] {
            let primary = tiles.iter().find(|t| t.id == id).unwrap();
            let have: Vec<&Tile> = tiles.iter().filter(|t| t.mirror_of == Some(id)).collect();
            let want = mirrors_of(primary, SymmetryMode::Radial, center, &mut TileIds::default());
            assert_eq!(have.len(), 3, "tile {id}");
            for (h, w) in have.iter().zip(&want) {
                assert!((h.pos - w.pos).norm() < 1e-9);
            }
        }
        let moved = tiles.iter().find(|t| t.id == TileId(1)).unwrap();
        // left side onto tile 0's right side, pushed 1 outward
        assert!((moved.pos - Vector2::new(251.0, 150.0)).norm() < 1e-9);
    }
}
