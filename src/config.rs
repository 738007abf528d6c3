//! Compiler configuration.
//!
//! Settings come from an optional `rescomp.toml` in the resource root (the
//! directory holding the root manifest). Keys missing from the file keep their
//! defaults, so it only needs the ones it changes:
//!
//! ```toml
//! [output]
//! source_extension = "cpp"
//! header_extension = "hpp"
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [output]
//! source_extension = "c"                     # Generated source file extension
//! header_extension = "h"                     # Generated header file extension
//! clean_extensions = ["c", "h", "cpp", "hpp"] # Removed from the output tree before each run
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! A source extension of `cpp`, `cc`, `cxx` or `c++` switches the generated
//! source file to C++ (see [`SourceLanguage`]).

use crate::render::SourceLanguage;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the resource root.
pub const CONFIG_FILE_NAME: &str = "rescomp.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Compiler configuration loaded from `rescomp.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Generated file naming and cleanup.
    pub output: OutputConfig,
}

/// Generated file naming and cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Extension of the generated source file (no leading dot).
    pub source_extension: String,
    /// Extension of the generated header file (no leading dot).
    pub header_extension: String,
    /// Extensions deleted from the output tree before generation.
    pub clean_extensions: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            source_extension: "c".to_string(),
            header_extension: "h".to_string(),
            clean_extensions: ["c", "h", "cpp", "hpp"].map(String::from).to_vec(),
        }
    }
}

/// Source extensions compiled as C++.
const CPP_SOURCE_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "c++"];

impl OutputConfig {
    /// Language the generated source file is compiled as.
    pub fn source_language(&self) -> SourceLanguage {
        let ext = self.source_extension.to_lowercase();
        if CPP_SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            SourceLanguage::Cpp
        } else {
            SourceLanguage::C
        }
    }
}

impl CompilerConfig {
    /// Validate extension settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let output = &self.output;
        for (key, ext) in [
            ("output.source_extension", &output.source_extension),
            ("output.header_extension", &output.header_extension),
        ] {
            check_extension(key, ext)?;
        }
        for ext in &output.clean_extensions {
            check_extension("output.clean_extensions", ext)?;
        }
        if output.source_extension == output.header_extension {
            return Err(ConfigError::Validation(
                "output.source_extension and output.header_extension must differ".into(),
            ));
        }
        for (key, ext) in [
            ("output.source_extension", &output.source_extension),
            ("output.header_extension", &output.header_extension),
        ] {
            if !output.clean_extensions.contains(ext) {
                return Err(ConfigError::Validation(format!(
                    "{key} \"{ext}\" must be listed in output.clean_extensions"
                )));
            }
        }
        Ok(())
    }
}

fn check_extension(key: &str, ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if ext.starts_with('.') || ext.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "{key} must be a bare extension like \"h\", got \"{ext}\""
        )));
    }
    Ok(())
}

/// Load `rescomp.toml` from the resource root.
///
/// A missing file yields the defaults. Keys absent from the file keep their
/// default values; unknown keys are an error.
pub fn load_config(resource_root: &Path) -> Result<CompilerConfig, ConfigError> {
    let config_path = resource_root.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(CompilerConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: CompilerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `rescomp.toml`.
///
/// Printed by `rescomp --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# rescomp configuration
# =====================
# Place this file next to the root manifest as `rescomp.toml`.
# All settings are optional; values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Generated files
# ---------------------------------------------------------------------------
[output]
# Extension of the generated source file holding the byte arrays.
source_extension = "c"

# Extension of the generated header holding the extern declarations.
header_extension = "h"

# Every file with one of these extensions is deleted from the output
# directory tree before generation. Must include both extensions above.
clean_extensions = ["c", "h", "cpp", "hpp"]
"##
}
