//! Centralized path handling for manifests and generated files.
//!
//! Every path that flows through the compiler is made absolute and lexically
//! normalized first, so comparisons like "is this entry the manifest itself?"
//! are plain equality checks. Nothing here touches the filesystem.
//!
//! ## Manifest Naming
//!
//! Manifests are JSON files. Nested manifests are referenced from a content
//! list by their `.rc` name and loaded from the matching `.rc.json` file:
//!
//! - `textures.rc` → nested manifest, loaded from `textures.rc.json`
//! - `textures.rc.json` → nested manifest, loaded as-is
//! - `logo.png` → leaf asset

use std::path::{Component, Path, PathBuf};

/// Extension marking a content entry as a nested manifest.
pub const MANIFEST_EXTENSION: &str = "rc";

/// Extension every manifest file carries on disk.
pub const JSON_EXTENSION: &str = "json";

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Leading `..` on relative paths are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `cwd` (if relative) and normalize the result.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// The on-disk file for a manifest path: `.json` is appended unless the path
/// already carries it.
pub fn manifest_file_path(path: &Path) -> PathBuf {
    if has_extension(path, JSON_EXTENSION) {
        return path.to_path_buf();
    }
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(JSON_EXTENSION);
    PathBuf::from(os)
}

/// Whether a resolved content entry refers to a nested manifest.
pub fn is_manifest_path(path: &Path) -> bool {
    if has_extension(path, MANIFEST_EXTENSION) {
        return true;
    }
    let suffix = format!(".{MANIFEST_EXTENSION}.{JSON_EXTENSION}");
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(&suffix))
        .unwrap_or(false)
}

/// Whether a command-line argument looks like a resource manifest.
///
/// The path needs an extension, and either that extension is `json` or the
/// file name contains `.rc` somewhere (`pack.rc`, `pack.rc.json`).
pub fn is_manifest_argument(path: &Path) -> bool {
    if path.extension().is_none() {
        return false;
    }
    let marker = format!(".{MANIFEST_EXTENSION}");
    has_extension(path, JSON_EXTENSION)
        || path
            .file_name()
            .map(|name| name.to_string_lossy().contains(&marker))
            .unwrap_or(false)
}

/// `path` relative to `root`, or `None` if it lies outside of it.
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    normalize(path)
        .strip_prefix(normalize(root))
        .ok()
        .map(Path::to_path_buf)
}

/// Include path of a generated header, relative to the output root.
///
/// Always uses `/` so generated code is identical across platforms:
/// `("fonts/ui.rc.json", "Fonts", "h")` → `"fonts/Fonts.h"`.
pub fn header_include_path(relative_manifest: &Path, name: &str, header_extension: &str) -> String {
    let mut parts: Vec<String> = relative_manifest
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    parts.push(format!("{name}.{header_extension}"));
    parts.join("/")
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
