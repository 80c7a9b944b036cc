use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: the subcommand, its inputs and its parameters.
pub struct Payload {
    pub command: &'static str,
    pub inputs: Vec<String>,
    pub params: Value,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            inputs: Vec::new(),
            params,
        }
    }

    pub fn with_input<P: AsRef<Path>>(mut self, input: P) -> Self {
        self.inputs.push(input.as_ref().display().to_string());
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
pub struct Record {
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    command: &'static str,
    inputs: Vec<String>,
    params: Value,
    outputs: Vec<String>,
}

impl Record {
    #[track_caller]
    fn new(payload: Payload, outputs: Vec<String>) -> Self {
        let callsite = Location::caller();
        Self {
            code_rev: current_git_rev(),
            version: tilesnap::VERSION,
            callsite: Callsite {
                file: callsite.file(),
                line: callsite.line(),
            },
            command: payload.command,
            inputs: payload.inputs,
            params: payload.params,
            outputs,
        }
    }
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = provenance_path(artifact);
    let record = Record::new(payload, vec![artifact.display().to_string()]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    tracing::debug!(path = %sidecar.display(), "provenance_written");
    Ok(sidecar)
}

/// Provenance block for stdout (`report`), without outputs.
#[track_caller]
pub fn report(payload: Payload) -> Record {
    Record::new(payload, Vec::new())
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit of the running build: `GIT_COMMIT` at build or run time, else `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
