//! Producer-side fragment constructors.
//!
//! Each function builds one pre-quoted script element of the kind the
//! Android Gradle model expects: NDK compiler flags, preprocessor
//! defines, path entries, and typed assignment values. Quoting and
//! escaping happen here so the renderer can stay a verbatim traversal.

use droidgen_core::paths::sanitise_path;

use crate::element::ScriptElement;

fn quoted(s: &str) -> String {
    format!("\"{}\"", s)
}

/// `cppFlags.add("<flag>")`
pub fn cpp_flag(flag: &str) -> ScriptElement {
    ScriptElement::statement(format!("cppFlags.add({})", quoted(flag)))
}

/// `cppFlags.add("-D<define>=<value>")`
pub fn preprocessor_define(define: &str, value: &str) -> ScriptElement {
    ScriptElement::statement(format!("cppFlags.add(\"-D{}={}\")", define, value))
}

/// `cppFlags.add("-I${project.rootDir}/<path>".toString())`
pub fn header_include_path(path: &str) -> ScriptElement {
    ScriptElement::statement(format!(
        "cppFlags.add(\"-I${{project.rootDir}}/{}\".toString())",
        sanitise_path(path)
    ))
}

/// `cppFlags.add("-L<path>".toString())`
pub fn library_search_path(path: &str) -> ScriptElement {
    ScriptElement::statement(format!(
        "cppFlags.add(\"-L{}\".toString())",
        sanitise_path(path)
    ))
}

/// A bare (unquoted) assignment value: numbers, booleans, expressions.
pub fn value(key: &str, v: impl ToString) -> ScriptElement {
    ScriptElement::key_value(key, v.to_string())
}

/// A boolean assignment value.
pub fn bool_value(key: &str, v: bool) -> ScriptElement {
    ScriptElement::key_value(key, if v { "true" } else { "false" })
}

/// A quoted string assignment. Values containing interpolation or quote
/// characters get a `.toString()` suffix so Gradle coerces the GString.
pub fn string_value(key: &str, s: &str) -> ScriptElement {
    let mut v = quoted(s);
    if s.contains(['$', '{', '"', '\'']) {
        v.push_str(".toString()");
    }
    ScriptElement::key_value(key, v)
}

/// A `new File("<path>")` assignment with the path sanitised.
pub fn file_path_value(key: &str, path: &str) -> ScriptElement {
    ScriptElement::key_value(key, format!("new File(\"{}\")", sanitise_path(path)))
}
