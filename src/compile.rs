//! Manifest tree compilation.
//!
//! Walks a manifest tree depth-first and writes one source/header pair per
//! manifest node, mirroring the manifest layout under the output root.
//!
//! ## Per-node steps
//!
//! ```text
//! render dependency includes
//!   → for each content entry, in manifest order:
//!       self-reference   → skip
//!       nested manifest  → load, compile recursively, record its header include
//!       leaf asset       → embed bytes, append (namespaced) declarations
//!   → write <name>.c
//!   → write <name>.h
//! ```
//!
//! A nested manifest is compiled to completion (including its file writes)
//! before the parent moves on to its next entry, so a parent's files are
//! always written after all of its children's.
//!
//! ## Failure
//!
//! The first error aborts the run. Files already written for completed
//! nodes stay on disk; the next run cleans the output tree first anyway.
//!
//! ## Progress
//!
//! Progress is reported as [`CompileEvent`]s through a caller-supplied sink,
//! in the order things happen. The CLI turns them into stdout lines
//! (see [`crate::output`]).

use crate::clean::{self, CleanError};
use crate::config::{CompilerConfig, ConfigError};
use crate::emit::{self, AssetKind, EmitError};
use crate::manifest::{ManifestError, Resource};
use crate::paths;
use crate::render;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Manifest cycle: {0} includes itself through a nested manifest")]
    ManifestCycle(PathBuf),
}

/// Everything a run needs to know about where things live.
///
/// Built once at startup and never modified.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory containing the root manifest. Manifest-relative paths are
    /// computed from here.
    pub resource_root: PathBuf,
    /// Directory the manifest layout is mirrored into.
    pub output_root: PathBuf,
    pub config: CompilerConfig,
}

impl Context {
    /// Build a context from absolute roots.
    pub fn new(resource_root: &Path, output_root: &Path, config: CompilerConfig) -> Self {
        Self {
            resource_root: paths::normalize(resource_root),
            output_root: paths::normalize(output_root),
            config,
        }
    }

    /// Output directory for a resource: its manifest directory, mirrored.
    pub fn output_dir(&self, resource: &Resource) -> PathBuf {
        let relative_dir = resource.relative_path.parent().unwrap_or(Path::new(""));
        self.output_root.join(relative_dir)
    }

    pub fn source_path(&self, resource: &Resource) -> PathBuf {
        self.output_dir(resource).join(format!(
            "{}.{}",
            resource.name, self.config.output.source_extension
        ))
    }

    pub fn header_path(&self, resource: &Resource) -> PathBuf {
        self.output_dir(resource).join(format!(
            "{}.{}",
            resource.name, self.config.output.header_extension
        ))
    }
}

/// Progress notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileEvent {
    /// A manifest file is about to be read.
    LoadingManifest { path: PathBuf },
    /// A leaf asset was embedded.
    AssetEmbedded {
        symbol: String,
        path: PathBuf,
        size: usize,
        kind: AssetKind,
    },
    /// A content entry pointing at its own manifest was skipped.
    EntrySkipped { path: PathBuf },
    /// A generated file was written.
    FileWritten { path: PathBuf },
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Stale generated files removed before generation.
    pub cleaned: usize,
    pub manifests: usize,
    pub assets: usize,
    /// Total bytes embedded across all assets.
    pub bytes: usize,
    pub files_written: usize,
}

/// Clean the output tree, then compile the manifest tree rooted at
/// `manifest`.
pub fn compile<F>(ctx: &Context, manifest: &Path, sink: F) -> Result<CompileSummary, CompileError>
where
    F: FnMut(&CompileEvent),
{
    let cleaned = prepare_output_root(ctx)?;

    let mut compiler = Compiler {
        ctx,
        sink,
        summary: CompileSummary {
            cleaned,
            ..CompileSummary::default()
        },
        chain: Vec::new(),
    };
    let root = compiler.load(manifest)?;
    compiler.process(&root)?;

    info!(
        "Compiled {} manifests, embedded {} assets ({} bytes), wrote {} files",
        compiler.summary.manifests,
        compiler.summary.assets,
        compiler.summary.bytes,
        compiler.summary.files_written
    );
    Ok(compiler.summary)
}

/// Clean an existing output root, or create a missing one.
fn prepare_output_root(ctx: &Context) -> Result<usize, CompileError> {
    if ctx.output_root.is_dir() {
        let removed = clean::clean_generated(&ctx.output_root, &ctx.config.output.clean_extensions)?;
        info!(
            "Removed {} stale generated files from {}",
            removed.len(),
            ctx.output_root.display()
        );
        return Ok(removed.len());
    }
    debug!("Creating output directory {}", ctx.output_root.display());
    fs::create_dir_all(&ctx.output_root).map_err(|source| CompileError::Write {
        path: ctx.output_root.clone(),
        source,
    })?;
    Ok(0)
}

/// Generated text accumulated over one node's content loop.
#[derive(Debug, Default)]
struct NodeText {
    source: String,
    header: String,
    internal_includes: String,
}

struct Compiler<'a, F> {
    ctx: &'a Context,
    sink: F,
    summary: CompileSummary,
    /// Manifests currently being compiled, outermost first.
    chain: Vec<PathBuf>,
}

impl<F> Compiler<'_, F>
where
    F: FnMut(&CompileEvent),
{
    fn report(&mut self, event: CompileEvent) {
        (self.sink)(&event);
    }

    /// Announce, then load. The announcement comes first so a manifest that
    /// fails to load still has its progress line.
    fn load(&mut self, path: &Path) -> Result<Resource, CompileError> {
        self.report(CompileEvent::LoadingManifest {
            path: paths::normalize(&paths::manifest_file_path(path)),
        });
        let resource = Resource::load(path, &self.ctx.resource_root)?;
        self.summary.manifests += 1;
        Ok(resource)
    }

    fn process(&mut self, resource: &Resource) -> Result<(), CompileError> {
        let manifest_path = resource.manifest_path(&self.ctx.resource_root);
        self.chain.push(manifest_path.clone());
        let result = self.process_node(resource, &manifest_path);
        self.chain.pop();
        result
    }

    fn process_node(&mut self, resource: &Resource, manifest_path: &Path) -> Result<(), CompileError> {
        let manifest_dir = resource.manifest_dir(&self.ctx.resource_root);
        let external = render::dependency_includes(&resource.dependencies);
        let language = self.ctx.config.output.source_language();
        let mut text = NodeText::default();

        for entry in &resource.content {
            let item = paths::normalize(&manifest_dir.join(&entry.path));

            if is_self_reference(&item, manifest_path) {
                debug!("Skipping self-reference in {}", manifest_path.display());
                self.report(CompileEvent::EntrySkipped { path: item });
                continue;
            }

            if paths::is_manifest_path(&item) {
                let child_file = paths::manifest_file_path(&item);
                if self.chain.contains(&child_file) {
                    return Err(CompileError::ManifestCycle(child_file));
                }
                let child = self.load(&item)?;
                self.process(&child)?;
                let include = child.header_include(&self.ctx.config.output.header_extension);
                text.internal_includes
                    .push_str(&render::internal_include(&include));
            } else {
                let fragment = emit::emit_asset(&item, &entry.name, language)?;
                text.source.push_str(&fragment.source);
                if entry.namespace.is_empty() {
                    text.header.push_str(&fragment.header);
                } else {
                    text.header
                        .push_str(&render::entry_namespace(&entry.namespace, &fragment.header));
                }
                self.summary.assets += 1;
                self.summary.bytes += fragment.size;
                self.report(CompileEvent::AssetEmbedded {
                    symbol: entry.name.clone(),
                    path: item,
                    size: fragment.size,
                    kind: fragment.kind,
                });
            }
        }

        let out_dir = self.ctx.output_dir(resource);
        fs::create_dir_all(&out_dir).map_err(|source| CompileError::Write {
            path: out_dir.clone(),
            source,
        })?;

        let source_path = self.ctx.source_path(resource);
        let source_text = render::source_file(&external, &text.source, language);
        self.write(&source_path, &source_text)?;

        let header_path = self.ctx.header_path(resource);
        let header_text = render::header_file(
            &external,
            &text.internal_includes,
            &resource.namespace,
            &text.header,
        );
        self.write(&header_path, &header_text)?;
        Ok(())
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<(), CompileError> {
        fs::write(path, contents).map_err(|source| CompileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.summary.files_written += 1;
        self.report(CompileEvent::FileWritten {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}

/// An entry naming its own manifest, with or without the `.json` suffix.
fn is_self_reference(item: &Path, manifest_path: &Path) -> bool {
    item == manifest_path
        || (paths::is_manifest_path(item) && paths::manifest_file_path(item) == manifest_path)
}
