//! CLI output formatting.
//!
//! Stdout carries exactly one line per manifest read and one per written
//! file, in the order they happen:
//!
//! ```text
//! Resource JSON: /work/res/pack.rc.json
//! Resource JSON: /work/res/fonts/fonts.rc.json
//! Out: /work/res/fonts/Fonts.c
//! Out: /work/res/fonts/Fonts.h
//! Out: /work/res/Pack.c
//! Out: /work/res/Pack.h
//! ```
//!
//! Everything else (embedded assets, skipped entries, the run summary) goes
//! to the log at debug/info level.
//!
//! Format functions are pure and return strings; the `print_*`/`log_*`
//! wrappers do the I/O.

use crate::compile::{CompileEvent, CompileSummary};
use crate::emit::AssetKind;
use log::debug;

/// The stdout line for an event, if it has one.
pub fn format_event(event: &CompileEvent) -> Option<String> {
    match event {
        CompileEvent::LoadingManifest { path } => {
            Some(format!("Resource JSON: {}", path.display()))
        }
        CompileEvent::FileWritten { path } => Some(format!("Out: {}", path.display())),
        CompileEvent::AssetEmbedded { .. } | CompileEvent::EntrySkipped { .. } => None,
    }
}

/// Log detail for events that have no stdout line.
pub fn format_event_detail(event: &CompileEvent) -> Option<String> {
    match event {
        CompileEvent::AssetEmbedded {
            symbol,
            path,
            size,
            kind,
        } => {
            let kind = match kind {
                AssetKind::Binary => "",
                AssetKind::Shader => " (shader)",
            };
            Some(format!(
                "Embedded {} as {symbol}: {size} bytes{kind}",
                path.display()
            ))
        }
        CompileEvent::EntrySkipped { path } => {
            Some(format!("Skipped self-reference {}", path.display()))
        }
        CompileEvent::LoadingManifest { .. } | CompileEvent::FileWritten { .. } => None,
    }
}

/// Print an event's stdout line, or log its detail.
pub fn print_event(event: &CompileEvent) {
    if let Some(line) = format_event(event) {
        println!("{line}");
    } else if let Some(detail) = format_event_detail(event) {
        debug!("{detail}");
    }
}

/// One-line run summary.
pub fn format_summary(summary: &CompileSummary) -> String {
    format!(
        "{} manifests, {} assets ({} bytes), {} files written, {} stale files removed",
        summary.manifests, summary.assets, summary.bytes, summary.files_written, summary.cleaned
    )
}
