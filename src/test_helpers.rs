//! Shared test utilities for the rescomp test suite.
//!
//! Builds manifest trees in temp directories and runs the compiler with an
//! event recorder, so tests can assert on both the files on disk and the
//! order in which things happened.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "a.bin", &[1, 2, 3]);
//! let manifest = write_manifest(tmp.path(), "pack.rc.json", json!({ ... }));
//!
//! let (result, events) = run(&context_for(tmp.path()), &manifest);
//! result.unwrap();
//! assert!(read_text(&tmp.path().join("Pack.c")).contains("kA[]"));
//! ```

use std::path::{Path, PathBuf};

use crate::compile::{self, CompileError, CompileEvent, CompileSummary, Context};
use crate::config::CompilerConfig;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `bytes` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a manifest document to `root/rel`.
pub fn write_manifest(root: &Path, rel: &str, doc: serde_json::Value) -> PathBuf {
    let text = serde_json::to_string_pretty(&doc).unwrap();
    write_file(root, rel, text.as_bytes())
}

/// A manifest with no dependencies and no content.
pub fn empty_manifest(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "namespace": "",
        "dependencies": [],
        "content": []
    })
}

/// Context generating in place (output root = resource root).
pub fn context_for(root: &Path) -> Context {
    Context::new(root, root, CompilerConfig::default())
}

/// Context generating into a separate output root.
pub fn context_with_output(root: &Path, output: &Path) -> Context {
    Context::new(root, output, CompilerConfig::default())
}

// =========================================================================
// Running
// =========================================================================

/// Compile `manifest`, recording every event.
pub fn run(
    ctx: &Context,
    manifest: &Path,
) -> (Result<CompileSummary, CompileError>, Vec<CompileEvent>) {
    let mut events = Vec::new();
    let result = compile::compile(ctx, manifest, |e| events.push(e.clone()));
    (result, events)
}

pub fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

// =========================================================================
// Event extractors
// =========================================================================

/// Paths of written files, in write order.
pub fn written_files(events: &[CompileEvent]) -> Vec<PathBuf> {
    events
        .iter()
        .filter_map(|e| match e {
            CompileEvent::FileWritten { path } => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Symbols of embedded assets, in embed order.
pub fn embedded_symbols(events: &[CompileEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            CompileEvent::AssetEmbedded { symbol, .. } => Some(symbol.as_str()),
            _ => None,
        })
        .collect()
}

/// Loads and writes as `"load <path>"` / `"write <path>"` lines.
pub fn event_lines(events: &[CompileEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            CompileEvent::LoadingManifest { path } => Some(format!("load {}", path.display())),
            CompileEvent::FileWritten { path } => Some(format!("write {}", path.display())),
            _ => None,
        })
        .collect()
}
