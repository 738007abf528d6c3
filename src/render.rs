//! C/C++ text templates for generated resource files.
//!
//! Pure string builders. The generated pair is plain C that also compiles
//! as C++: every C++-only construct (`namespace`, `extern "C"`) sits behind
//! an `#ifdef __cplusplus` guard.
//!
//! ```text
//! // Pack.c                               // Pack.h
//! #include <stddef.h>                     // Auto-generated resource file. Do not edit.
//! const char kLogo[] = {137,80,78,71,     //
//! };                                      // #pragma once
//! const size_t kLogo_len = sizeof(kLogo); //
//!                                         // #include <stddef.h>
//!                                         // #include "fonts/Fonts.h"
//!                                         // ...extern declarations...
//! ```

use std::fmt::Write;

/// Language the generated source file is compiled as.
///
/// Headers are always written to compile as both. A C++ source needs its
/// definitions spelled differently: namespace-scope `const` has internal
/// linkage in C++, and a braced initializer must not narrow `int` to `char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    C,
    Cpp,
}

/// First lines of every generated header.
pub const HEADER_BANNER: &str = "// Auto-generated resource file. Do not edit.\n\n#pragma once\n\n";

/// `#include <dep>` for each external dependency, in manifest order.
pub fn dependency_includes(dependencies: &[String]) -> String {
    dependencies
        .iter()
        .map(|dep| format!("#include <{dep}>\n"))
        .collect()
}

/// `#include "path"` for a header generated from a nested manifest.
pub fn internal_include(path: &str) -> String {
    format!("#include \"{path}\"\n")
}

/// Byte array definition plus its length constant.
///
/// Bytes are written as unsigned decimals, each followed by a comma. In C++
/// the definitions are marked `extern` and bytes above 127 are cast to
/// `char`.
pub fn byte_array(symbol: &str, bytes: &[u8], language: SourceLanguage) -> String {
    let mut out = String::with_capacity(bytes.len() * 4 + symbol.len() * 3 + 64);
    let storage = match language {
        SourceLanguage::C => "",
        SourceLanguage::Cpp => "extern ",
    };
    let _ = write!(out, "{storage}const char {symbol}[] = {{");
    for &byte in bytes {
        if language == SourceLanguage::Cpp && byte > 127 {
            let _ = write!(out, "(char){byte},");
        } else {
            let _ = write!(out, "{byte},");
        }
    }
    out.push_str("\n};\n");
    let _ = writeln!(out, "{storage}const size_t {symbol}_len = sizeof({symbol});");
    out
}

/// Extern declarations matching [`byte_array`], with C linkage under C++.
pub fn extern_declarations(symbol: &str) -> String {
    format!(
        "\n#ifdef __cplusplus\nextern \"C\" {{\n#endif\n\
         extern const char {symbol}[];\n\
         extern const size_t {symbol}_len;\n\
         #ifdef __cplusplus\n}}\n#endif\n"
    )
}

/// Wrap one content entry's declarations in its own namespace.
pub fn entry_namespace(namespace: &str, body: &str) -> String {
    format!(
        "\n#ifdef __cplusplus\nnamespace {namespace} {{\n#endif\n{body}\n#ifdef __cplusplus\n}}\n#endif\n"
    )
}

/// Wrap a whole header body in the resource's namespace.
pub fn node_namespace(namespace: &str, body: &str) -> String {
    format!(
        "#ifdef __cplusplus\nnamespace {namespace}\n{{\n#endif\n{body}#ifdef __cplusplus\n}}\n#endif\n"
    )
}

/// Full source file text.
///
/// A C++ body goes inside an `extern "C"` block so its symbols match the
/// header's declarations.
pub fn source_file(external: &str, body: &str, language: SourceLanguage) -> String {
    let mut out = String::with_capacity(external.len() + body.len() + 32);
    out.push_str(external);
    if language == SourceLanguage::Cpp && !body.is_empty() {
        out.push_str("extern \"C\" {\n");
        out.push_str(body);
        out.push_str("}\n");
    } else {
        out.push_str(body);
    }
    out
}

/// Full header file text.
///
/// The namespace wraps the accumulated body once. An empty body is never
/// wrapped, so a resource without leaf assets yields only the banner and
/// includes.
pub fn header_file(external: &str, internal: &str, namespace: &str, body: &str) -> String {
    let mut out = String::with_capacity(
        HEADER_BANNER.len() + external.len() + internal.len() + body.len() + 64,
    );
    out.push_str(HEADER_BANNER);
    out.push_str(external);
    out.push_str(internal);
    if namespace.is_empty() || body.is_empty() {
        out.push_str(body);
    } else {
        out.push_str(&node_namespace(namespace, body));
    }
    out
}
