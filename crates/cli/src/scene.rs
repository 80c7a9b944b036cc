//! Scene files and output tables.
//!
//! A scene is a canvas plus a tile list. JSON scenes carry an optional
//! `canvas: {width, height}` and `tiles: [{id, shape, x, y, rotation, color?, mirror_of?}]`.
//! CSV scenes use the same tile columns (no canvas; the default applies).
//! Tables (edges, suggestions) are written with polars as CSV, or parquet when
//! the output path ends in `.parquet`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

use tilesnap::prelude::*;

/// Scene as the CLI works with it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub bounds: Bounds2,
    pub tiles: Vec<Tile>,
}

#[derive(Serialize, Deserialize)]
struct SceneFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canvas: Option<CanvasDims>,
    tiles: Vec<TileRecord>,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct CanvasDims {
    width: f64,
    height: f64,
}

#[derive(Serialize, Deserialize)]
struct TileRecord {
    id: u64,
    shape: String,
    x: f64,
    y: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mirror_of: Option<u64>,
}

impl TileRecord {
    fn into_tile(self) -> Result<Tile> {
        let shape: ShapeKind = self
            .shape
            .parse()
            .with_context(|| format!("tile {}", self.id))?;
        let mut tile = Tile::new(TileId(self.id), shape, Vector2::new(self.x, self.y))
            .with_rotation(self.rotation);
        if let Some(color) = self.color {
            tile = tile.with_color(color);
        }
        tile.mirror_of = self.mirror_of.map(TileId);
        Ok(tile)
    }

    fn from_tile(t: &Tile) -> Self {
        Self {
            id: t.id.0,
            shape: t.shape.name().to_string(),
            x: t.pos.x,
            y: t.pos.y,
            rotation: t.rotation,
            color: Some(t.color.clone()),
            mirror_of: t.mirror_of.map(|m| m.0),
        }
    }
}

fn is_ext(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Load a JSON or CSV scene, chosen by extension.
pub fn read_scene(path: &Path) -> Result<Scene> {
    let scene = if is_ext(path, "csv") {
        read_scene_csv(path)?
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let file: SceneFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        let bounds = file
            .canvas
            .map(|c| Bounds2::canvas(c.width, c.height))
            .unwrap_or_default();
        let tiles = file
            .tiles
            .into_iter()
            .map(TileRecord::into_tile)
            .collect::<Result<Vec<_>>>()?;
        Scene { bounds, tiles }
    };
    check_ids(&scene.tiles)?;
    tracing::debug!(path = %path.display(), tiles = scene.tiles.len(), "scene_loaded");
    Ok(scene)
}

fn check_ids(tiles: &[Tile]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for t in tiles {
        if !seen.insert(t.id) {
            bail!("duplicate tile id {}", t.id);
        }
    }
    Ok(())
}

fn read_scene_csv(path: &Path) -> Result<Scene> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading csv scene {}", path.display()))?;
    let ids = int_column(&df, "id")?;
    let shapes = str_column(&df, "shape")?;
    let xs = float_column(&df, "x")?;
    let ys = float_column(&df, "y")?;
    let rotations = match df.column("rotation") {
        Ok(_) => float_column(&df, "rotation")?,
        Err(_) => vec![Some(0.0); df.height()],
    };
    let colors = match df.column("color") {
        Ok(_) => str_column(&df, "color")?,
        Err(_) => vec![None; df.height()],
    };
    let mirrors = match df.column("mirror_of") {
        Ok(_) => int_column(&df, "mirror_of")?,
        Err(_) => vec![None; df.height()],
    };

    let mut tiles = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let (Some(id), Some(shape), Some(x), Some(y)) =
            (ids[row], shapes[row].clone(), xs[row], ys[row])
        else {
            bail!("row {row}: id, shape, x and y are required");
        };
        let id = u64::try_from(id).with_context(|| format!("row {row}: negative id"))?;
        let mirror_of = mirrors[row]
            .map(u64::try_from)
            .transpose()
            .with_context(|| format!("row {row}: negative mirror_of"))?;
        let record = TileRecord {
            id,
            shape,
            x,
            y,
            rotation: rotations[row].unwrap_or(0.0),
            color: colors[row].clone(),
            mirror_of,
        };
        tiles.push(record.into_tile()?);
    }
    Ok(Scene {
        bounds: Bounds2::default(),
        tiles,
    })
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Float64)?;
    let values = s.f64()?.into_iter().collect();
    Ok(values)
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Int64)?;
    let values = s.i64()?.into_iter().collect();
    Ok(values)
}

fn str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::String)?;
    let values = s.str()?.into_iter().map(|v| v.map(str::to_string)).collect();
    Ok(values)
}

/// Write a scene as JSON, or as a CSV tile table when the path ends in `.csv`.
pub fn write_scene(path: &Path, scene: &Scene) -> Result<()> {
    ensure_parent(path)?;
    if is_ext(path, "csv") {
        let mut df = tiles_frame(&scene.tiles)?;
        return write_table(path, &mut df);
    }
    let size = scene.bounds.max - scene.bounds.min;
    let file = SceneFile {
        canvas: Some(CanvasDims {
            width: size.x,
            height: size.y,
        }),
        tiles: scene.tiles.iter().map(TileRecord::from_tile).collect(),
    };
    fs::write(path, serde_json::to_vec_pretty(&file)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn tiles_frame(tiles: &[Tile]) -> Result<DataFrame> {
    let df = df!(
        "id" => tiles.iter().map(|t| t.id.0 as i64).collect::<Vec<_>>(),
        "shape" => tiles.iter().map(|t| t.shape.name()).collect::<Vec<_>>(),
        "x" => tiles.iter().map(|t| t.pos.x).collect::<Vec<_>>(),
        "y" => tiles.iter().map(|t| t.pos.y).collect::<Vec<_>>(),
        "rotation" => tiles.iter().map(|t| t.rotation).collect::<Vec<_>>(),
        "color" => tiles.iter().map(|t| t.color.clone()).collect::<Vec<_>>(),
        "mirror_of" => tiles.iter().map(|t| t.mirror_of.map(|m| m.0 as i64)).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// One row per edge of every tile, in tile then catalog order.
pub fn edge_frame(tiles: &[Tile]) -> Result<DataFrame> {
    let mut tile_id = Vec::new();
    let mut index = Vec::new();
    let mut cols: [Vec<f64>; 10] = Default::default();
    for t in tiles {
        for (i, e) in edges_of(t).iter().enumerate() {
            tile_id.push(t.id.0 as i64);
            index.push(i as i64);
            let row = [
                e.start.x,
                e.start.y,
                e.end.x,
                e.end.y,
                e.length,
                e.midpoint.x,
                e.midpoint.y,
                e.normal.x,
                e.normal.y,
                e.angle_deg(),
            ];
            for (col, v) in cols.iter_mut().zip(row) {
                col.push(v);
            }
        }
    }
    let [sx, sy, ex, ey, len, mx, my, nx, ny, angle] = cols;
    let df = df!(
        "tile_id" => tile_id,
        "edge" => index,
        "start_x" => sx,
        "start_y" => sy,
        "end_x" => ex,
        "end_y" => ey,
        "length" => len,
        "mid_x" => mx,
        "mid_y" => my,
        "normal_x" => nx,
        "normal_y" => ny,
        "angle_deg" => angle,
    )?;
    Ok(df)
}

pub fn suggestion_frame(suggestions: &[Suggestion]) -> Result<DataFrame> {
    let df = df!(
        "shape" => suggestions.iter().map(|s| s.shape.name()).collect::<Vec<_>>(),
        "x" => suggestions.iter().map(|s| s.pos.x).collect::<Vec<_>>(),
        "y" => suggestions.iter().map(|s| s.pos.y).collect::<Vec<_>>(),
        "rotation" => suggestions.iter().map(|s| s.rotation).collect::<Vec<_>>(),
    )?;
    Ok(df)
}

/// Write `df` to `path` as parquet (`.parquet`) or CSV (anything else).
pub fn write_table(path: &Path, df: &mut DataFrame) -> Result<()> {
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_ext(path, "parquet") {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    tracing::debug!(path = %path.display(), rows = df.height(), "table_written");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_scene_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(
            &path,
            r#"{"tiles":[{"id":3,"shape":"Square","x":300,"y":300},
                {"id":4,"shape":"hexagon","x":10,"y":20,"rotation":30,"color":"teal","mirror_of":3}]}"#,
        )
        .unwrap();
        let scene = read_scene(&path).unwrap();
        assert_eq!(scene.bounds, Bounds2::default());
        assert_eq!(scene.tiles.len(), 2);
        assert_eq!(scene.tiles[0].shape, ShapeKind::Square);
        assert_eq!(scene.tiles[0].rotation, 0.0);
        assert_eq!(scene.tiles[0].color, palette_color(3));
        assert_eq!(scene.tiles[1].mirror_of, Some(TileId(3)));
        assert_eq!(scene.tiles[1].color, "teal");
    }

    #[test]
    fn json_scene_survives_a_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/scene.json");
        let scene = Scene {
            bounds: Bounds2::canvas(1024.0, 768.0),
            tiles: vec![Tile::new(TileId(0), ShapeKind::Diamond, Vector2::new(5.0, 6.0))
                .with_rotation(45.0)],
        };
        write_scene(&path, &scene).unwrap();
        assert_eq!(read_scene(&path).unwrap(), scene);
    }

    #[test]
    fn unknown_shape_and_duplicate_ids_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"tiles":[{"id":1,"shape":"pentagon","x":0,"y":0}]}"#).unwrap();
        let err = read_scene(&path).unwrap_err();
        assert!(format!("{err:#}").contains("pentagon"));

        fs::write(
            &path,
            r#"{"tiles":[{"id":1,"shape":"square","x":0,"y":0},{"id":1,"shape":"square","x":9,"y":0}]}"#,
        )
        .unwrap();
        assert!(read_scene(&path).is_err());
    }

    #[test]
    fn csv_scene_without_optional_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.csv");
        fs::write(&path, "id,shape,x,y\n0,square,300,300\n1,triangle,360.5,300\n").unwrap();
        let scene = read_scene(&path).unwrap();
        assert_eq!(scene.tiles.len(), 2);
        assert_eq!(scene.tiles[1].shape, ShapeKind::Triangle);
        assert!((scene.tiles[1].pos.x - 360.5).abs() < 1e-12);
        assert!(scene.tiles.iter().all(|t| !t.is_mirror() && t.rotation == 0.0));
    }

    #[test]
    fn csv_scene_rejects_negative_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.csv");
        fs::write(&path, "id,shape,x,y,mirror_of\n0,square,300,300,\n1,square,500,300,-1\n")
            .unwrap();
        let err = read_scene(&path).unwrap_err();
        assert!(format!("{err:#}").contains("negative mirror_of"));

        fs::write(&path, "id,shape,x,y\n-2,square,300,300\n").unwrap();
        let err = read_scene(&path).unwrap_err();
        assert!(format!("{err:#}").contains("negative id"));
    }

    #[test]
    fn csv_scene_written_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.csv");
        let mut tiles = vec![Tile::new(TileId(0), ShapeKind::Square, Vector2::new(100.0, 100.0))];
        tiles.extend(mirrors_of(
            &tiles[0],
            SymmetryMode::Horizontal,
            Vector2::new(400.0, 300.0),
            &mut TileIds::starting_at(1),
        ));
        let scene = Scene {
            bounds: Bounds2::default(),
            tiles,
        };
        write_scene(&path, &scene).unwrap();
        let back = read_scene(&path).unwrap();
        assert_eq!(back.tiles[1].mirror_of, Some(TileId(0)));
        assert_eq!(back.tiles[1].pos, Vector2::new(700.0, 100.0));
    }

    #[test]
    fn edge_table_has_one_row_per_edge() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.csv");
        let tiles = [
            Tile::new(TileId(0), ShapeKind::Square, Vector2::new(300.0, 300.0)),
            Tile::new(TileId(1), ShapeKind::Hexagon, Vector2::new(500.0, 300.0)),
        ];
        let mut df = edge_frame(&tiles).unwrap();
        assert_eq!(df.height(), 10);
        write_table(&path, &mut df).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("tile_id,edge,start_x"));
        assert_eq!(text.lines().count(), 11);
    }
}
