//! Tolerance overrides loaded from `--config <json>`.
//!
//! Every field is optional; missing ones keep the library defaults. The merged
//! configuration is validated before any command runs.
//!
//! ```json
//! { "snap": { "max_edge_gap": 30 }, "suggest": { "clearance": 60 } }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tilesnap::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ToleranceFile {
    snap: SnapOverrides,
    suggest: SuggestOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SnapOverrides {
    max_length_delta: Option<f64>,
    max_edge_gap: Option<f64>,
    min_opposition_cos: Option<f64>,
    min_parallel_cos: Option<f64>,
    separation_push: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SuggestOverrides {
    clearance: Option<f64>,
    band_tolerance_deg: Option<f64>,
}

/// Effective tolerances for one CLI run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Tolerances {
    #[serde(serialize_with = "snap_json")]
    pub snap: SnapCfg,
    #[serde(serialize_with = "suggest_json")]
    pub suggest: SuggestCfg,
}

impl Tolerances {
    /// Defaults, overridden by `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let file: ToleranceFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing config {}", path.display()))?;
        let tol = Self::default().merged(file);
        tol.snap
            .validate()
            .and_then(|_| tol.suggest.validate())
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?tol, "config_loaded");
        Ok(tol)
    }

    fn merged(mut self, file: ToleranceFile) -> Self {
        let s = file.snap;
        let snap = &mut self.snap;
        snap.max_length_delta = s.max_length_delta.unwrap_or(snap.max_length_delta);
        snap.max_edge_gap = s.max_edge_gap.unwrap_or(snap.max_edge_gap);
        snap.min_opposition_cos = s.min_opposition_cos.unwrap_or(snap.min_opposition_cos);
        snap.min_parallel_cos = s.min_parallel_cos.unwrap_or(snap.min_parallel_cos);
        snap.separation_push = s.separation_push.unwrap_or(snap.separation_push);
        let g = file.suggest;
        self.suggest.clearance = g.clearance.unwrap_or(self.suggest.clearance);
        self.suggest.band_tolerance_deg =
            g.band_tolerance_deg.unwrap_or(self.suggest.band_tolerance_deg);
        self
    }

    /// Suggestion settings on the given canvas.
    pub fn suggest_on(&self, bounds: Bounds2) -> SuggestCfg {
        SuggestCfg {
            bounds,
            ..self.suggest
        }
    }
}

fn snap_json<S: serde::Serializer>(c: &SnapCfg, s: S) -> Result<S::Ok, S::Error> {
    serde_json::json!({
        "max_length_delta": c.max_length_delta,
        "max_edge_gap": c.max_edge_gap,
        "min_opposition_cos": c.min_opposition_cos,
        "min_parallel_cos": c.min_parallel_cos,
        "separation_push": c.separation_push,
    })
    .serialize(s)
}

fn suggest_json<S: serde::Serializer>(c: &SuggestCfg, s: S) -> Result<S::Ok, S::Error> {
    serde_json::json!({
        "clearance": c.clearance,
        "band_tolerance_deg": c.band_tolerance_deg,
    })
    .serialize(s)
}
