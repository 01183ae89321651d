//! Path sanitisation helpers for generated scripts.

/// Expand `${user.home}` anywhere and a leading `~` to the real home
/// directory. A `~` elsewhere in the path is an ordinary character.
pub fn expand_home_token(path: &str) -> String {
    let home = dirs::home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let path = path.replace("${user.home}", &home);
    match path.strip_prefix('~') {
        Some(rest) => format!("{}{}", home, rest),
        None => path,
    }
}

/// Prepare a path for embedding in a generated Gradle script or
/// properties file: home tokens expanded, backslashes doubled so the
/// consumer's string parser sees them intact.
pub fn sanitise_path(path: &str) -> String {
    expand_home_token(path).replace('\\', "\\\\")
}

/// Convert a path to forward slashes for makefiles and Gradle scripts,
/// which expect unix-style separators on every host.
pub fn unix_style(path: &str) -> String {
    path.replace('\\', "/")
}

/// Escape spaces for makefile value positions.
pub fn escape_spaces(path: &str) -> String {
    path.replace(' ', "\\ ")
}
