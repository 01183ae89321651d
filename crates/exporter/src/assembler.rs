//! Build descriptor assembly.
//!
//! Walks the build configurations and settings once per generation pass
//! and produces the script and markup trees for every generated file.
//! All policy lives here: which configuration names are accepted, how
//! architecture lists are tokenized, and how the activity class name is
//! split into package and simple name. Assembly is pure; nothing is
//! written to disk.

use droidgen_core::paths::sanitise_path;
use droidgen_core::settings::keys;
use droidgen_core::{
    comma_or_whitespace_tokens, BuildConfiguration, ExportError, Project, Result, SettingsStore,
};
use droidgen_gradle_script::{fragments, ScriptElement};
use droidgen_manifest_writer::ManifestSpec;

/// Assembles the generated-file contents for one project.
pub struct Assembler<'a> {
    project: &'a Project,
}

impl<'a> Assembler<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// The project this assembler reads from.
    pub fn project(&self) -> &'a Project {
        self.project
    }

    fn settings(&self) -> &SettingsStore {
        &self.project.settings
    }

    //==========================================================================
    // Activity class handling

    /// The fully qualified activity class, from settings or derived from
    /// the bundle identifier and project name.
    pub fn activity_class(&self) -> String {
        let configured = self.settings().get(keys::ACTIVITY_CLASS);
        if !configured.is_empty() {
            return configured.to_string();
        }

        let mut s = self.project.bundle_identifier.to_lowercase();

        let plausible_package = s.len() > 5
            && s.contains('.')
            && !s.starts_with('.')
            && s.chars().all(|c| c.is_ascii_lowercase() || c == '_' || c == '.');

        if plausible_package {
            if !s.ends_with('.') {
                s.push('.');
            }
        } else {
            s = "com.yourcompany.".to_string();
        }

        s + &make_identifier(&self.project.name)
    }

    /// Package part of the activity class ("com.example" of
    /// "com.example.App").
    pub fn activity_package(&self) -> Result<String> {
        let class = self.activity_class();
        match class.rsplit_once('.') {
            Some((package, name)) if !package.is_empty() && !name.is_empty() => {
                Ok(package.to_string())
            }
            _ => Err(ExportError::InvalidActivityClass(class)),
        }
    }

    /// Simple name of the activity class ("App" of "com.example.App").
    pub fn activity_name(&self) -> Result<String> {
        let class = self.activity_class();
        match class.rsplit_once('.') {
            Some((package, name)) if !package.is_empty() && !name.is_empty() => {
                Ok(name.to_string())
            }
            _ => Err(ExportError::InvalidActivityClass(class)),
        }
    }

    /// Manifest activity name: an activity sub-class overrides the
    /// default class's simple name.
    pub fn activity_sub_class_name(&self) -> Result<String> {
        let sub = self.settings().get(keys::ACTIVITY_SUB_CLASS);
        if sub.is_empty() {
            return self.activity_name();
        }
        Ok(sub.rsplit_once('.').map(|(_, n)| n).unwrap_or(sub).to_string())
    }

    /// The activity class with slashes instead of dots, as embedded in
    /// native-code class-path defines.
    pub fn activity_class_path(&self) -> String {
        self.activity_class().replace('.', "/")
    }

    //==========================================================================
    // Configuration policy

    /// Map a configuration name to its build-type block name. The build
    /// tool only knows "debug" and "release"; anything else is a fatal
    /// generation error, not a warning.
    pub fn build_type_name(config: &BuildConfiguration) -> Result<String> {
        let lower = config.name.to_lowercase();
        if lower == "debug" || lower == "release" {
            Ok(lower)
        } else {
            Err(ExportError::UnsupportedConfiguration(config.name.clone()))
        }
    }

    /// The ordered union of architectures across every configuration.
    /// Empty tokens are dropped; an empty union cannot produce a
    /// buildable project and fails the pass.
    pub fn architectures(&self) -> Result<Vec<String>> {
        let mut archs: Vec<String> = Vec::new();

        for config in &self.project.configurations {
            for arch in comma_or_whitespace_tokens(&config.architectures) {
                if !archs.contains(&arch) {
                    archs.push(arch);
                }
            }
        }

        if archs.is_empty() {
            return Err(ExportError::NoArchitectures);
        }

        Ok(archs)
    }

    /// Architecture tokens for the first configuration matching `debug`.
    pub fn architectures_for(&self, debug: bool) -> Vec<String> {
        self.project
            .configurations
            .iter()
            .find(|c| c.debug == debug)
            .map(|c| comma_or_whitespace_tokens(&c.architectures))
            .unwrap_or_default()
    }

    //==========================================================================
    // Permissions

    /// Manifest permissions: the custom list plus the flag-driven ones,
    /// de-duplicated in order.
    pub fn required_permissions(&self) -> Vec<String> {
        let settings = self.settings();
        let mut perms = comma_or_whitespace_tokens(settings.get(keys::OTHER_PERMISSIONS));

        if settings.get_bool(keys::INTERNET_NEEDED) {
            perms.push("android.permission.INTERNET".to_string());
        }
        if settings.get_bool(keys::MIC_NEEDED) {
            perms.push("android.permission.RECORD_AUDIO".to_string());
        }
        if settings.get_bool(keys::BLUETOOTH_NEEDED) {
            perms.push("android.permission.BLUETOOTH".to_string());
            perms.push("android.permission.BLUETOOTH_ADMIN".to_string());
            perms.push("android.permission.ACCESS_COARSE_LOCATION".to_string());
        }

        let mut cleaned: Vec<String> = Vec::new();
        for p in perms {
            if !cleaned.contains(&p) {
                cleaned.push(p);
            }
        }
        cleaned
    }

    //==========================================================================
    // Generated file contents

    /// `settings.gradle`
    pub fn settings_gradle(&self) -> String {
        "include ':app'".to_string()
    }

    /// Root `build.gradle`: the buildscript repository/dependency
    /// declarations plus the allprojects repositories.
    pub fn project_build_gradle(&self) -> String {
        let buildscript = ScriptElement::block("buildscript")
            .with_child(repositories_block())
            .with_child(
                ScriptElement::block("dependencies").with_child(ScriptElement::statement(format!(
                    "classpath 'com.android.tools.build:gradle:{}'",
                    self.settings().get(keys::PLUGIN_VERSION)
                ))),
            );

        let allprojects = ScriptElement::block("allprojects").with_child(repositories_block());

        let mut out = buildscript.render();
        out.push_str(&allprojects.render());
        out
    }

    /// `app/build.gradle`
    pub fn app_build_gradle(&self) -> Result<String> {
        let mut out = String::from("apply plugin: 'com.android.application'\n");
        out.push_str(&self.android_block()?.render());
        out.push_str(&self.build_types_block()?.render());
        out.push_str(&self.signing_configs_block().render());
        out.push_str(&self.product_flavors_block()?.render());
        out.push_str(&self.sources_block().render());
        Ok(out)
    }

    fn android_block(&self) -> Result<ScriptElement> {
        let min_sdk = self.settings().get_int(keys::MIN_SDK);

        let ndk_build = ScriptElement::block("ndkBuild")
            .with_child(fragments::string_value("path", "Android.mk"));

        let default_config = ScriptElement::block("defaultConfig.with")
            .with_child(fragments::string_value(
                "applicationId",
                &self.project.bundle_identifier.to_lowercase(),
            ))
            .with_child(fragments::value("minSdkVersion", min_sdk))
            .with_child(fragments::value("targetSdkVersion", min_sdk));

        Ok(ScriptElement::block("android")
            .with_child(fragments::value("compileSdkVersion", min_sdk))
            .with_child(fragments::string_value(
                "buildToolsVersion",
                self.settings().get(keys::BUILD_TOOLS_VERSION),
            ))
            .with_child(ScriptElement::block("externalNativeBuild").with_child(ndk_build))
            .with_child(default_config))
    }

    fn build_types_block(&self) -> Result<ScriptElement> {
        let mut build_types = ScriptElement::block("android.buildTypes");

        for config in &self.project.configurations {
            let mut block = ScriptElement::block(Self::build_type_name(config)?);

            if !config.debug {
                block.push(fragments::value(
                    "signingConfig",
                    "$(\"android.signingConfigs.releaseConfig\")",
                ));
            }

            block.push(self.ndk_settings_block(config));
            build_types.push(block);
        }

        Ok(build_types)
    }

    fn ndk_settings_block(&self, config: &BuildConfiguration) -> ScriptElement {
        let mut ndk = ScriptElement::block("ndk.with");

        if config.debug {
            ndk.push(fragments::bool_value("debuggable", true));
            ndk.push(fragments::cpp_flag("-g"));
            ndk.push(fragments::preprocessor_define("DEBUG", "1"));
            ndk.push(fragments::preprocessor_define("_DEBUG", "1"));
        } else {
            ndk.push(fragments::preprocessor_define("NDEBUG", "1"));
        }

        ndk.push(fragments::cpp_flag(&format!(
            "-O{}",
            config.optimisation.gcc_flag()
        )));

        for path in &config.header_search_paths {
            ndk.push(fragments::header_include_path(path));
        }
        for path in &config.library_search_paths {
            ndk.push(fragments::library_search_path(path));
        }

        for (key, value) in self.platform_defines() {
            ndk.push(fragments::preprocessor_define(&key, &value));
        }
        for (key, value) in &config.preprocessor_defines {
            ndk.push(fragments::preprocessor_define(key, value));
        }

        ndk
    }

    /// Defines every configuration gets: the target API level and the
    /// activity class, in both identifier and class-path spelling.
    pub fn platform_defines(&self) -> Vec<(String, String)> {
        vec![
            ("APP_ANDROID".to_string(), "1".to_string()),
            (
                "APP_ANDROID_API_VERSION".to_string(),
                self.settings().get(keys::MIN_SDK).to_string(),
            ),
            (
                "APP_ACTIVITY_CLASSNAME".to_string(),
                self.activity_class_path().replace('/', "_"),
            ),
            (
                "APP_ACTIVITY_CLASSPATH".to_string(),
                format!("\\\"{}\\\"", self.activity_class_path()),
            ),
        ]
    }

    fn signing_configs_block(&self) -> ScriptElement {
        let settings = self.settings();

        // Empty credentials still produce a complete block; the build
        // tool reports the missing values at signing time, not us.
        let release = ScriptElement::block("create(\"releaseConfig\")")
            .with_child(fragments::file_path_value(
                "storeFile",
                settings.get(keys::KEY_STORE),
            ))
            .with_child(fragments::string_value(
                "storePassword",
                settings.get(keys::KEY_STORE_PASS),
            ))
            .with_child(fragments::string_value(
                "keyAlias",
                settings.get(keys::KEY_ALIAS),
            ))
            .with_child(fragments::string_value(
                "keyPassword",
                settings.get(keys::KEY_ALIAS_PASS),
            ))
            .with_child(fragments::string_value("storeType", "jks"));

        // No debug entry: the build tool falls back to its own debug
        // keystore.
        ScriptElement::block("android.signingConfigs").with_child(release)
    }

    fn product_flavors_block(&self) -> Result<ScriptElement> {
        let mut flavors = ScriptElement::block("android.productFlavors");

        for arch in self.architectures()? {
            flavors.push(
                ScriptElement::block(format!("create(\"{}\")", arch)).with_child(
                    ScriptElement::statement(format!("ndk.abiFilters.add(\"{}\")", arch)),
                ),
            );
        }

        Ok(flavors)
    }

    fn sources_block(&self) -> ScriptElement {
        let source = ScriptElement::block("source")
            .with_child(ScriptElement::statement("exclude \"**/Modules/\""));
        let jni = ScriptElement::block("jni").with_child(source);
        let main = ScriptElement::block("main").with_child(jni);
        ScriptElement::block("android.sources").with_child(main)
    }

    /// `local.properties`
    pub fn local_properties(&self) -> String {
        format!(
            "ndk.dir={}\nsdk.dir={}\n",
            sanitise_path(self.settings().get(keys::NDK_PATH)),
            sanitise_path(self.settings().get(keys::SDK_PATH))
        )
    }

    /// `gradle/wrapper/gradle-wrapper.properties`
    pub fn wrapper_properties(&self) -> String {
        format!(
            "distributionUrl=https\\://services.gradle.org/distributions/gradle-{}-all.zip",
            self.settings().get(keys::GRADLE_VERSION)
        )
    }

    /// Derive the manifest inputs from validated settings.
    pub fn manifest_spec(&self, has_icon: bool) -> Result<ManifestSpec> {
        let settings = self.settings();
        Ok(ManifestSpec {
            package: self.activity_package()?,
            version_code: settings.get(keys::VERSION_CODE).to_string(),
            version_name: self.project.version.clone(),
            min_sdk: settings.get_int(keys::MIN_SDK),
            activity_name: self.activity_sub_class_name()?,
            screen_orientation: settings.get(keys::SCREEN_ORIENTATION).to_string(),
            theme: settings.get(keys::THEME).to_string(),
            permissions: self.required_permissions(),
            has_icon,
            requires_gles2: settings.get_bool(keys::GLES2_REQUIRED),
        })
    }
}

fn repositories_block() -> ScriptElement {
    ScriptElement::block("repositories").with_child(ScriptElement::statement("jcenter()"))
}

/// Reduce an arbitrary project name to a plausible class identifier.
fn make_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if ident.is_empty() {
        ident.push_str("App");
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidgen_core::OptimisationLevel;

    fn project() -> Project {
        let mut p = Project::new("Demo", "com.example.demo");
        p.settings.set(keys::ACTIVITY_CLASS, "com.example.App");
        p.settings.set(keys::SDK_PATH, "/opt/android/sdk");
        p.settings.set(keys::NDK_PATH, "/opt/android/ndk");
        p
    }

    #[test]
    fn activity_class_splits_into_package_and_name() {
        let p = project();
        let asm = Assembler::new(&p);
        assert_eq!(asm.activity_package().unwrap(), "com.example");
        assert_eq!(asm.activity_name().unwrap(), "App");
    }

    #[test]
    fn dotless_activity_class_is_fatal() {
        let mut p = project();
        p.settings.set(keys::ACTIVITY_CLASS, "App");
        let asm = Assembler::new(&p);
        assert!(matches!(
            asm.activity_package(),
            Err(ExportError::InvalidActivityClass(_))
        ));
    }

    #[test]
    fn default_activity_class_is_derived_from_bundle_id() {
        let p = Project::new("My Synth", "com.example.mysynth");
        let asm = Assembler::new(&p);
        assert_eq!(asm.activity_class(), "com.example.mysynth.My_Synth");
    }

    #[test]
    fn configuration_names_map_case_insensitively() {
        let mut debug = BuildConfiguration::debug();
        debug.name = "DEBUG".to_string();
        assert_eq!(Assembler::build_type_name(&debug).unwrap(), "debug");

        let mut odd = BuildConfiguration::release();
        odd.name = "Profiling".to_string();
        assert!(matches!(
            Assembler::build_type_name(&odd),
            Err(ExportError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn architectures_union_is_ordered_and_distinct() {
        let mut p = project();
        p.configurations[0].architectures = " armeabi,  x86 ".to_string();
        p.configurations[1].architectures = "armeabi armeabi-v7a".to_string();
        let asm = Assembler::new(&p);
        assert_eq!(
            asm.architectures().unwrap(),
            vec!["armeabi", "x86", "armeabi-v7a"]
        );
    }

    #[test]
    fn empty_architecture_union_is_fatal() {
        let mut p = project();
        p.configurations[0].architectures = " , ".to_string();
        p.configurations[1].architectures = String::new();
        let asm = Assembler::new(&p);
        assert!(matches!(
            asm.architectures(),
            Err(ExportError::NoArchitectures)
        ));
    }

    #[test]
    fn app_build_gradle_contains_every_section() {
        let p = project();
        let asm = Assembler::new(&p);
        let script = asm.app_build_gradle().unwrap();

        assert!(script.starts_with("apply plugin: 'com.android.application'\n"));
        assert!(script.contains("compileSdkVersion = 23"));
        assert!(script.contains("applicationId = \"com.example.demo\""));
        assert!(script.contains("android.buildTypes {"));
        assert!(script.contains("    debug {"));
        assert!(script.contains("    release {"));
        assert!(script.contains("signingConfig = $(\"android.signingConfigs.releaseConfig\")"));
        assert!(script.contains("android.productFlavors {"));
        assert!(script.contains("ndk.abiFilters.add(\"armeabi\")"));
    }

    #[test]
    fn empty_signing_fields_still_emit_the_block() {
        let mut p = project();
        p.settings.set(keys::KEY_STORE, "");
        p.settings.set(keys::KEY_STORE_PASS, "");
        p.settings.set(keys::KEY_ALIAS, "");
        p.settings.set(keys::KEY_ALIAS_PASS, "");
        let asm = Assembler::new(&p);
        let script = asm.app_build_gradle().unwrap();

        assert!(script.contains("create(\"releaseConfig\")"));
        assert!(script.contains("storePassword = \"\""));
        assert!(script.contains("keyAlias = \"\""));
    }

    #[test]
    fn debug_config_block_carries_debug_defines() {
        let mut p = project();
        p.configurations[0]
            .preprocessor_defines
            .insert("MY_FLAG".to_string(), "42".to_string());
        p.configurations[0].optimisation = OptimisationLevel::None;
        let asm = Assembler::new(&p);
        let script = asm.app_build_gradle().unwrap();

        assert!(script.contains("cppFlags.add(\"-DDEBUG=1\")"));
        assert!(script.contains("cppFlags.add(\"-D_DEBUG=1\")"));
        assert!(script.contains("cppFlags.add(\"-O0\")"));
        assert!(script.contains("cppFlags.add(\"-DMY_FLAG=42\")"));
        assert!(script.contains("cppFlags.add(\"-DNDEBUG=1\")"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let p = project();
        let asm = Assembler::new(&p);
        assert_eq!(
            asm.app_build_gradle().unwrap(),
            asm.app_build_gradle().unwrap()
        );
        assert_eq!(asm.project_build_gradle(), asm.project_build_gradle());
    }

    #[test]
    fn wrapper_properties_embed_gradle_version() {
        let p = project();
        let asm = Assembler::new(&p);
        assert_eq!(
            asm.wrapper_properties(),
            "distributionUrl=https\\://services.gradle.org/distributions/gradle-2.14.1-all.zip"
        );
    }

    #[test]
    fn permissions_follow_flags_and_custom_list() {
        let mut p = project();
        p.settings.set(keys::OTHER_PERMISSIONS, "android.permission.CAMERA");
        p.settings.set(keys::MIC_NEEDED, "true");
        p.settings.set(keys::BLUETOOTH_NEEDED, "false");
        let asm = Assembler::new(&p);
        let perms = asm.required_permissions();

        assert_eq!(
            perms,
            vec![
                "android.permission.CAMERA",
                "android.permission.INTERNET",
                "android.permission.RECORD_AUDIO",
            ]
        );
    }
}
