//! # rescomp
//!
//! A build-time resource compiler. A tree of JSON manifests describes which
//! files to embed; rescomp turns every manifest into a C source/header pair
//! holding the files' bytes as arrays, wired together with `#include`s so the
//! generated code builds as one unit.
//!
//! # Pipeline
//!
//! ```text
//! 1. Clean     output/            delete stale .c/.h/.cpp/.hpp files
//! 2. Load      pack.rc.json   →   Resource
//! 3. Compile   Resource       →   Pack.c + Pack.h   (depth-first over nested manifests)
//! ```
//!
//! Given
//!
//! ```text
//! res/
//! ├── pack.rc.json          { "name": "Pack", "content": [logo.png, fonts/fonts.rc] }
//! ├── logo.png
//! └── fonts/
//!     ├── fonts.rc.json     { "name": "Fonts", "content": [ui.ttf] }
//!     └── ui.ttf
//! ```
//!
//! the output tree mirrors the manifests:
//!
//! ```text
//! out/
//! ├── Pack.c                const char kLogo[] = {137,80,78,71,...};
//! ├── Pack.h                #include "fonts/Fonts.h" + extern declarations
//! └── fonts/
//!     ├── Fonts.c
//!     └── Fonts.h
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Loads one manifest file into a [`manifest::Resource`] |
//! | [`emit`] | Embeds one leaf asset as source + header fragments |
//! | [`compile`] | Depth-first tree walk, accumulation, and file writes |
//! | [`clean`] | Removes stale generated files from the output tree |
//! | [`render`] | C/C++ text templates (includes, arrays, namespace guards) |
//! | [`paths`] | Path normalization and manifest naming rules |
//! | [`config`] | `rescomp.toml` loading and validation |
//! | [`output`] | CLI output formatting of progress events |
//!
//! # Design Decisions
//!
//! ## Plain C Output
//!
//! Generated files are C. C++-only constructs are guarded by
//! `#ifdef __cplusplus`: namespaces, and the `extern "C"` block that
//! gives the declarations C linkage. One header therefore serves C and C++
//! consumers, and namespaced declarations still link against the file-scope
//! arrays in the `.c` file.
//!
//! A C++ source extension (`cpp`, `cc`, `cxx`) in `rescomp.toml` switches the
//! source file to C++: definitions become `extern` inside an `extern "C"`
//! block, so the same header still resolves against them.
//!
//! ## Deterministic Output
//!
//! Output depends only on manifest and asset contents. There are no
//! timestamps, no hash-map iteration, and paths inside generated code are
//! root-relative with `/` separators. Running twice produces byte-identical
//! files.
//!
//! ## Immutable Context
//!
//! Resource root, output root, and configuration live in a
//! [`compile::Context`] built once at startup and passed by reference through
//! the walk. There is no global state.

pub mod clean;
pub mod compile;
pub mod config;
pub mod emit;
pub mod manifest;
pub mod output;
pub mod paths;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
