//! Resource manifest loading.
//!
//! A manifest is a JSON description of one resource node:
//!
//! ```json
//! {
//!   "name": "Textures",
//!   "namespace": "res",
//!   "dependencies": ["stddef.h"],
//!   "content": [
//!     { "path": "logo.png", "name": "kLogo" },
//!     { "path": "shaders/blur.hlsl", "name": "kBlur", "namespace": "shaders" },
//!     { "path": "fonts/fonts.rc", "name": "unused" }
//!   ]
//! }
//! ```
//!
//! All four top-level fields are required. Each content entry needs `path`
//! and `name`; its `namespace` defaults to empty. Entries whose path names a
//! nested manifest are resolved by the compiler, not here: loading one
//! manifest never reads another.

use crate::paths;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Manifest {0} has an empty name")]
    EmptyName(PathBuf),
    #[error("Manifest {path} lies outside the resource root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// One item of a manifest's content list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    /// Asset or nested manifest path, relative to the owning manifest.
    pub path: String,
    /// Symbol for the embedded byte array. Unused for nested manifests.
    pub name: String,
    /// Namespace wrapping this entry's declarations. Empty for none.
    #[serde(default)]
    pub namespace: String,
}

/// Raw manifest document as it appears on disk.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    name: String,
    namespace: String,
    dependencies: Vec<String>,
    content: Vec<ContentEntry>,
}

/// One loaded manifest node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Base name of the generated files.
    pub name: String,
    /// Namespace wrapping the whole header body. Empty for none.
    pub namespace: String,
    /// External include identifiers, in manifest order.
    pub dependencies: Vec<String>,
    pub content: Vec<ContentEntry>,
    /// Manifest file path relative to the resource root.
    pub relative_path: PathBuf,
}

impl Resource {
    /// Load the manifest at `path`, appending `.json` when missing.
    ///
    /// `path` should be absolute; `resource_root` is the directory the
    /// relative path (and so the output layout) is computed from.
    pub fn load(path: &Path, resource_root: &Path) -> Result<Self, ManifestError> {
        let path = paths::normalize(&paths::manifest_file_path(path));
        if !path.is_file() {
            return Err(ManifestError::NotFound(path));
        }

        let relative_path =
            paths::relative_to(&path, resource_root).ok_or_else(|| ManifestError::OutsideRoot {
                path: path.clone(),
                root: resource_root.to_path_buf(),
            })?;

        let bytes = fs::read(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        let file: ManifestFile = serde_json::from_slice(&bytes).map_err(|source| {
            ManifestError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        if file.name.is_empty() {
            return Err(ManifestError::EmptyName(path));
        }

        Ok(Resource {
            name: file.name,
            namespace: file.namespace,
            dependencies: file.dependencies,
            content: file.content,
            relative_path,
        })
    }

    /// Absolute path of this manifest file.
    pub fn manifest_path(&self, resource_root: &Path) -> PathBuf {
        paths::normalize(&resource_root.join(&self.relative_path))
    }

    /// Directory content entries are resolved against.
    pub fn manifest_dir(&self, resource_root: &Path) -> PathBuf {
        let manifest = self.manifest_path(resource_root);
        manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| resource_root.to_path_buf())
    }

    /// Include path of this resource's generated header.
    pub fn header_include(&self, header_extension: &str) -> String {
        paths::header_include_path(&self.relative_path, &self.name, header_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn loads_all_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            tmp.path(),
            "pack.rc.json",
            json!({
                "name": "Pack",
                "namespace": "res",
                "dependencies": ["stddef.h", "engine/types.h"],
                "content": [
                    { "path": "a.bin", "name": "kA" },
                    { "path": "b.hlsl", "name": "kB", "namespace": "shaders" }
                ]
            }),
        );

        let resource = Resource::load(&path, tmp.path()).unwrap();
        assert_eq!(resource.name, "Pack");
        assert_eq!(resource.namespace, "res");
        assert_eq!(resource.dependencies, vec!["stddef.h", "engine/types.h"]);
        assert_eq!(resource.relative_path, PathBuf::from("pack.rc.json"));
        assert_eq!(
            resource.content,
            vec![
                ContentEntry {
                    path: "a.bin".into(),
                    name: "kA".into(),
                    namespace: String::new(),
                },
                ContentEntry {
                    path: "b.hlsl".into(),
                    name: "kB".into(),
                    namespace: "shaders".into(),
                },
            ]
        );
    }

    #[test]
    fn appends_json_extension() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "fonts/fonts.rc.json", empty_manifest("Fonts"));

        let resource = Resource::load(&tmp.path().join("fonts/fonts.rc"), tmp.path()).unwrap();
        assert_eq!(resource.name, "Fonts");
        assert_eq!(resource.relative_path, PathBuf::from("fonts/fonts.rc.json"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Resource::load(&tmp.path().join("nope.rc"), tmp.path());
        match result {
            Err(ManifestError::NotFound(path)) => {
                assert_eq!(path, tmp.path().join("nope.rc.json"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "bad.rc.json", b"{ \"name\": ");
        let result = Resource::load(&path, tmp.path());
        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "bad.rc.json", b"{\"name\": \"\xff\"}");
        match Resource::load(&path, tmp.path()) {
            Err(ManifestError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        for field in ["name", "namespace", "dependencies", "content"] {
            let mut doc = empty_manifest("Pack");
            doc.as_object_mut().unwrap().remove(field);
            let path = write_manifest(tmp.path(), "pack.rc.json", doc);

            let err = Resource::load(&path, tmp.path()).unwrap_err();
            assert!(
                err.to_string().contains(field),
                "error for missing `{field}` should name it: {err}"
            );
        }
    }

    #[test]
    fn content_entry_requires_path_and_name() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(
            tmp.path(),
            "pack.rc.json",
            json!({
                "name": "Pack",
                "namespace": "",
                "dependencies": [],
                "content": [{ "path": "a.bin" }]
            }),
        );
        let result = Resource::load(&path, tmp.path());
        assert!(matches!(result, Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn empty_name_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(tmp.path(), "pack.rc.json", empty_manifest(""));
        let result = Resource::load(&path, tmp.path());
        assert!(matches!(result, Err(ManifestError::EmptyName(_))));
    }

    #[test]
    fn manifest_outside_root_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(tmp.path(), "shared/common.rc.json", empty_manifest("Common"));
        let root = tmp.path().join("game");
        fs::create_dir_all(&root).unwrap();

        let result = Resource::load(&path, &root);
        assert!(matches!(result, Err(ManifestError::OutsideRoot { .. })));
    }

    #[test]
    fn manifest_dir_and_header_include() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest(tmp.path(), "ui/fonts.rc.json", empty_manifest("Fonts"));
        let resource = Resource::load(&path, tmp.path()).unwrap();

        assert_eq!(resource.manifest_path(tmp.path()), path);
        assert_eq!(resource.manifest_dir(tmp.path()), tmp.path().join("ui"));
        assert_eq!(resource.header_include("h"), "ui/Fonts.h");
    }
}
