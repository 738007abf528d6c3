//! Leaf asset embedding.
//!
//! Reads one asset file and turns it into a pair of fragments: the byte array
//! definition for the generated source file, and the matching extern
//! declarations for the generated header. Namespace wrapping is left to the
//! caller because it only applies to the header half.

use crate::render::{self, SourceLanguage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Asset not found: {path} (symbol `{symbol}`)")]
    NotFound { path: PathBuf, symbol: String },
    #[error("Failed to read asset {path} (symbol `{symbol}`): {source}")]
    Io {
        path: PathBuf,
        symbol: String,
        #[source]
        source: std::io::Error,
    },
}

/// Shader source extensions recognized by [`AssetKind::classify`].
const SHADER_EXTENSIONS: &[&str] = &["hlsl", "fx"];

/// Coarse classification of a leaf asset.
///
/// Only reported in progress events; every kind is embedded identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Binary,
    Shader,
}

impl AssetKind {
    pub fn classify(path: &Path) -> Self {
        let is_shader = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| SHADER_EXTENSIONS.contains(&ext.as_str()));
        if is_shader {
            AssetKind::Shader
        } else {
            AssetKind::Binary
        }
    }
}

/// Generated text for one leaf asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Byte array + length definitions for the source file.
    pub source: String,
    /// Extern declarations for the header file.
    pub header: String,
    /// Number of bytes embedded.
    pub size: usize,
    pub kind: AssetKind,
}

/// Embed the file at `path` under `symbol`, writing the definition for a
/// source file compiled as `language`.
pub fn emit_asset(
    path: &Path,
    symbol: &str,
    language: SourceLanguage,
) -> Result<Fragment, EmitError> {
    if !path.exists() {
        return Err(EmitError::NotFound {
            path: path.to_path_buf(),
            symbol: symbol.to_string(),
        });
    }
    let bytes = fs::read(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        symbol: symbol.to_string(),
        source,
    })?;

    Ok(Fragment {
        source: render::byte_array(symbol, &bytes, language),
        header: render::extern_declarations(symbol),
        size: bytes.len(),
        kind: AssetKind::classify(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn emits_every_byte() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let fragment = emit_asset(&path, "kA", SourceLanguage::C).unwrap();
        assert_eq!(fragment.size, 3);
        assert!(fragment.source.contains("const char kA[] = {1,2,3,\n};"));
        assert!(fragment.source.contains("const size_t kA_len = sizeof(kA);"));
        assert!(fragment.header.contains("extern const char kA[];"));
        assert!(fragment.header.contains("extern const size_t kA_len;"));
    }

    #[test]
    fn value_count_matches_file_length() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blob.bin");
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        fs::write(&path, &data).unwrap();

        let fragment = emit_asset(&path, "kBlob", SourceLanguage::C).unwrap();
        let start = fragment.source.find('{').unwrap() + 1;
        let end = fragment.source.find("\n}").unwrap();
        let values: Vec<&str> = fragment.source[start..end]
            .split(',')
            .filter(|v| !v.is_empty())
            .collect();
        assert_eq!(values.len(), data.len());
        assert_eq!(values[255], "255");
    }

    #[test]
    fn missing_file_is_not_found_with_symbol() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.bin");

        let err = emit_asset(&path, "x", SourceLanguage::C).unwrap_err();
        match &err {
            EmitError::NotFound { path: p, symbol } => {
                assert_eq!(p, &path);
                assert_eq!(symbol, "x");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("missing.bin"));
        assert!(message.contains("`x`"));
    }

    #[test]
    fn directory_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = emit_asset(tmp.path(), "kDir", SourceLanguage::C).unwrap_err();
        assert!(matches!(err, EmitError::Io { .. }));
    }

    #[test]
    fn cpp_definition_differs_only_in_source() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.bin");
        fs::write(&path, [0x7fu8, 0x80]).unwrap();

        let c = emit_asset(&path, "kA", SourceLanguage::C).unwrap();
        let cpp = emit_asset(&path, "kA", SourceLanguage::Cpp).unwrap();
        assert!(c.source.contains("{127,128,\n}"));
        assert!(cpp.source.contains("extern const char kA[] = {127,(char)128,\n};"));
        assert_eq!(c.header, cpp.header);
    }

    #[test]
    fn shader_extensions_classified() {
        assert_eq!(AssetKind::classify(Path::new("blur.hlsl")), AssetKind::Shader);
        assert_eq!(AssetKind::classify(Path::new("fx/glow.FX")), AssetKind::Shader);
        assert_eq!(AssetKind::classify(Path::new("logo.png")), AssetKind::Binary);
        assert_eq!(AssetKind::classify(Path::new("Makefile")), AssetKind::Binary);
    }

    #[test]
    fn shader_embedded_like_any_other_asset() {
        let tmp = TempDir::new().unwrap();
        let shader = tmp.path().join("blur.hlsl");
        let blob = tmp.path().join("blur.bin");
        fs::write(&shader, b"float4 main() {}").unwrap();
        fs::write(&blob, b"float4 main() {}").unwrap();

        let a = emit_asset(&shader, "kBlur", SourceLanguage::C).unwrap();
        let b = emit_asset(&blob, "kBlur", SourceLanguage::C).unwrap();
        assert_eq!(a.kind, AssetKind::Shader);
        assert_eq!(a.source, b.source);
        assert_eq!(a.header, b.header);
    }
}
