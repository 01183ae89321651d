//! Exporter settings store
//!
//! A string-keyed key/value store with per-key registered defaults. The
//! exporter reads every configurable property (paths, versions, flags)
//! through this store; a key that was never set reads back its default,
//! or the empty string when no default was registered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known settings keys and their factory defaults.
pub mod keys {
    pub const SCREEN_ORIENTATION: &str = "screenOrientation";
    pub const ACTIVITY_CLASS: &str = "activityClass";
    pub const ACTIVITY_SUB_CLASS: &str = "activitySubClassName";
    pub const VERSION_CODE: &str = "versionCode";
    pub const MIN_SDK: &str = "minSdk";
    pub const THEME: &str = "theme";
    pub const INTERNET_NEEDED: &str = "internetNeeded";
    pub const MIC_NEEDED: &str = "micNeeded";
    pub const BLUETOOTH_NEEDED: &str = "bluetoothNeeded";
    pub const OTHER_PERMISSIONS: &str = "otherPermissions";
    pub const GLES2_REQUIRED: &str = "gles2Required";
    pub const KEY_STORE: &str = "keyStore";
    pub const KEY_STORE_PASS: &str = "keyStorePass";
    pub const KEY_ALIAS: &str = "keyAlias";
    pub const KEY_ALIAS_PASS: &str = "keyAliasPass";
    pub const GRADLE_VERSION: &str = "gradleVersion";
    pub const PLUGIN_VERSION: &str = "pluginVersion";
    pub const TOOLCHAIN: &str = "toolchain";
    pub const BUILD_TOOLS_VERSION: &str = "buildToolsVersion";
    pub const STATIC_LIBRARIES: &str = "staticLibraries";
    pub const SHARED_LIBRARIES: &str = "sharedLibraries";
    pub const SDK_PATH: &str = "sdkPath";
    pub const NDK_PATH: &str = "ndkPath";

    /// `(key, default)` pairs registered on every new store.
    pub(super) const DEFAULTS: &[(&str, &str)] = &[
        (SCREEN_ORIENTATION, "unspecified"),
        (VERSION_CODE, "1"),
        (MIN_SDK, "23"),
        (INTERNET_NEEDED, "true"),
        (MIC_NEEDED, "false"),
        (BLUETOOTH_NEEDED, "true"),
        (KEY_STORE, "${user.home}/.android/debug.keystore"),
        (KEY_STORE_PASS, "android"),
        (KEY_ALIAS, "androiddebugkey"),
        (KEY_ALIAS_PASS, "android"),
        (GRADLE_VERSION, "2.14.1"),
        (PLUGIN_VERSION, "2.2.2"),
        (TOOLCHAIN, "clang"),
        (BUILD_TOOLS_VERSION, "23.0.2"),
    ];
}

/// Key/value backing store for exporter-configurable properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsStore {
    values: IndexMap<String, String>,
}

impl SettingsStore {
    /// Create an empty store; reads fall back to registered defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value, falling back to the registered default and then
    /// to the empty string.
    pub fn get(&self, key: &str) -> &str {
        if let Some(v) = self.values.get(key) {
            return v;
        }

        keys::DEFAULTS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, d)| *d)
            .unwrap_or("")
    }

    /// Boolean coercion: "true"/"1" (any case) read as true.
    pub fn get_bool(&self, key: &str) -> bool {
        let v = self.get(key);
        v.eq_ignore_ascii_case("true") || v == "1"
    }

    /// Integer coercion; unparseable values read as 0 rather than
    /// failing the caller.
    pub fn get_int(&self, key: &str) -> i64 {
        self.get(key).trim().parse().unwrap_or(0)
    }

    /// Store a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// True if the key has an explicitly stored (non-default) value.
    pub fn is_set(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_registered_default() {
        let store = SettingsStore::new();
        assert_eq!(store.get(keys::MIN_SDK), "23");
        assert_eq!(store.get(keys::KEY_ALIAS), "androiddebugkey");
    }

    #[test]
    fn unregistered_key_reads_empty() {
        let store = SettingsStore::new();
        assert_eq!(store.get(keys::THEME), "");
        assert_eq!(store.get("noSuchKey"), "");
    }

    #[test]
    fn set_overrides_default() {
        let store = SettingsStore::new().with(keys::MIN_SDK, "26");
        assert_eq!(store.get(keys::MIN_SDK), "26");
        assert_eq!(store.get_int(keys::MIN_SDK), 26);
        assert!(store.is_set(keys::MIN_SDK));
        assert!(!store.is_set(keys::GRADLE_VERSION));
    }

    #[test]
    fn bool_coercion_is_lenient() {
        let store = SettingsStore::new()
            .with(keys::MIC_NEEDED, "1")
            .with(keys::BLUETOOTH_NEEDED, "FALSE");
        assert!(store.get_bool(keys::MIC_NEEDED));
        assert!(!store.get_bool(keys::BLUETOOTH_NEEDED));
        assert!(store.get_bool(keys::INTERNET_NEEDED)); // default
    }
}
