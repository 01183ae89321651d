//! NDK makefile pair generation (Application.mk / Android.mk).

use droidgen_core::paths::{escape_spaces, unix_style};
use droidgen_core::settings::keys;
use droidgen_core::{comma_or_whitespace_tokens, BuildConfiguration, SourceFile};

use crate::assembler::Assembler;

const GENERATED_HEADER: &str = "# Automatically generated makefile, created by droidgen\n\
# Don't edit this file! Your changes will be overwritten when you re-save the project!\n";

/// Name of the JNI module the generated makefiles build.
pub const JNI_MODULE: &str = "app_jni";

/// `app/Application.mk`
pub fn application_mk(asm: &Assembler<'_>) -> String {
    let toolchain = asm_settings_toolchain(asm);
    let is_clang = toolchain == "clang";

    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    out.push_str(&format!(
        "APP_STL := {}\n",
        if is_clang { "c++_static" } else { "gnustl_static" }
    ));
    out.push_str(&format!("APP_CPPFLAGS += {}\n", app_cpp_flags(&toolchain)));
    out.push_str(&format!("APP_PLATFORM := {}\n", app_platform(asm)));
    out.push_str(&format!("NDK_TOOLCHAIN_VERSION := {}\n", toolchain));
    out.push('\n');
    out.push_str("ifeq ($(NDK_DEBUG),1)\n");
    out.push_str(&format!(
        "    APP_ABI := {}\n",
        asm.architectures_for(true).join(" ")
    ));
    out.push_str("else\n");
    out.push_str(&format!(
        "    APP_ABI := {}\n",
        asm.architectures_for(false).join(" ")
    ));
    out.push_str("endif\n");
    out
}

/// `app/Android.mk`
pub fn android_mk(asm: &Assembler<'_>, files: &[&SourceFile]) -> String {
    let project = asm.project();
    let settings = &project.settings;

    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    out.push_str("LOCAL_PATH := $(call my-dir)\n\n");
    out.push_str("include $(CLEAR_VARS)\n\n");
    out.push_str("ifeq ($(TARGET_ARCH_ABI), armeabi-v7a)\n");
    out.push_str("    LOCAL_ARM_MODE := arm\n");
    out.push_str("endif\n\n");
    out.push_str(&format!("LOCAL_MODULE := {}\n", JNI_MODULE));
    out.push_str("LOCAL_SRC_FILES := \\\n");

    for file in files {
        let path = unix_style(&file.path.to_string_lossy());
        out.push_str(&format!("  ../{}\\\n", escape_spaces(&path)));
    }

    push_variable_list(&mut out, "LOCAL_STATIC_LIBRARIES", settings.get(keys::STATIC_LIBRARIES));
    push_variable_list(&mut out, "LOCAL_SHARED_LIBRARIES", settings.get(keys::SHARED_LIBRARIES));

    out.push('\n');
    out.push_str("ifeq ($(NDK_DEBUG),1)\n");
    push_config_settings(&mut out, asm, true);
    out.push_str("else\n");
    push_config_settings(&mut out, asm, false);
    out.push_str("endif\n\n");
    out.push_str("include $(BUILD_SHARED_LIBRARY)\n");

    let mut modules = comma_or_whitespace_tokens(settings.get(keys::STATIC_LIBRARIES));
    modules.extend(comma_or_whitespace_tokens(settings.get(keys::SHARED_LIBRARIES)));
    for module in modules {
        out.push_str(&format!("$(call import-module,{})\n", module));
    }

    out
}

fn push_variable_list(out: &mut String, variable: &str, value: &str) {
    let items = comma_or_whitespace_tokens(value);
    if !items.is_empty() {
        out.push_str(&format!("\n{} := {}\n", variable, items.join(" ")));
    }
}

fn push_config_settings(out: &mut String, asm: &Assembler<'_>, for_debug: bool) {
    let project = asm.project();
    if let Some(config) = project.configurations.iter().find(|c| c.debug == for_debug) {
        let flags = cpp_flags_for(asm, config);
        out.push_str(&format!("  LOCAL_CPPFLAGS += {}\n", flags));
        out.push_str(&format!("  LOCAL_CFLAGS += {}\n", flags));
        out.push_str(&format!("{}\n", ldlibs_for(project, config)));
    }
}

/// Full compiler flag line for one configuration.
fn cpp_flags_for(asm: &Assembler<'_>, config: &BuildConfiguration) -> String {
    let mut defines: Vec<(String, String)> = Vec::new();
    defines.extend(asm.platform_defines());

    let mut flags = String::from("-fsigned-char -fexceptions -frtti");

    if config.debug {
        flags.push_str(" -g");
        defines.push(("DEBUG".to_string(), "1".to_string()));
        defines.push(("_DEBUG".to_string(), "1".to_string()));
    } else {
        defines.push(("NDEBUG".to_string(), "1".to_string()));
    }

    for path in &config.header_search_paths {
        flags.push_str(&format!(" -I \"{}\"", unix_style(path)));
    }

    flags.push_str(&format!(" -O{}", config.optimisation.gcc_flag()));
    flags.push_str(" -std=gnu++11");

    for (key, value) in &config.preprocessor_defines {
        defines.push((key.clone(), value.clone()));
    }

    for (key, value) in &defines {
        if value.is_empty() {
            flags.push_str(&format!(" -D{}", key));
        } else {
            flags.push_str(&format!(" -D{}={}", key, value));
        }
    }

    if !config.extra_compiler_flags.trim().is_empty() {
        flags.push(' ');
        flags.push_str(config.extra_compiler_flags.trim());
    }

    flags
}

/// Linker line for one configuration.
fn ldlibs_for(project: &droidgen_core::Project, config: &BuildConfiguration) -> String {
    let toolchain = project.settings.get(keys::TOOLCHAIN).to_string();
    let is_clang = toolchain == "clang";

    let mut out = String::from("  LOCAL_LDLIBS :=");

    for path in &config.library_search_paths {
        out.push_str(&format!(" -L{}", unix_style(path)));
    }

    out.push_str(" -llog -lGLESv2 -landroid -lEGL");

    if is_clang {
        out.push_str(" -latomic");
    }

    if !config.extra_linker_flags.trim().is_empty() {
        out.push(' ');
        out.push_str(config.extra_linker_flags.trim());
    }

    out
}

fn app_cpp_flags(toolchain: &str) -> String {
    let mut flags = String::from("-fsigned-char -fexceptions -frtti");
    if !toolchain.to_lowercase().starts_with("clang") {
        flags.push_str(" -Wno-psabi");
    }
    flags
}

/// `android-<minSdk>`; there is no platform 9, it aliases to 10.
fn app_platform(asm: &Assembler<'_>) -> String {
    let mut version = asm_settings_min_sdk(asm);
    if version == 9 {
        version = 10;
    }
    format!("android-{}", version)
}

fn asm_settings_toolchain(asm: &Assembler<'_>) -> String {
    asm.project().settings.get(keys::TOOLCHAIN).to_string()
}

fn asm_settings_min_sdk(asm: &Assembler<'_>) -> i64 {
    asm.project().settings.get_int(keys::MIN_SDK)
}
