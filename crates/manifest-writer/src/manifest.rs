//! AndroidManifest.xml assembly.
//!
//! Pure construction of the manifest tree from the values the exporter
//! has already validated and derived. No I/O here; the emission driver
//! writes the rendered document.

use crate::markup::MarkupElement;

const ANDROID_XMLNS: &str = "http://schemas.android.com/apk/res/android";

/// Everything the manifest needs, pre-derived by the exporter.
#[derive(Debug, Clone, Default)]
pub struct ManifestSpec {
    /// Package attribute, e.g. "com.example".
    pub package: String,

    /// android:versionCode.
    pub version_code: String,

    /// android:versionName.
    pub version_name: String,

    /// Minimum (and target) SDK level.
    pub min_sdk: i64,

    /// Simple activity class name, e.g. "App".
    pub activity_name: String,

    /// android:screenOrientation value.
    pub screen_orientation: String,

    /// Optional android:theme on the application element.
    pub theme: String,

    /// Permissions, already cleaned and de-duplicated.
    pub permissions: Vec<String>,

    /// Whether icon resources will be emitted alongside the manifest.
    pub has_icon: bool,

    /// Whether to declare the GLES 2.0 uses-feature requirement.
    pub requires_gles2: bool,
}

/// Build the manifest document tree.
pub fn build_manifest(spec: &ManifestSpec) -> MarkupElement {
    let mut manifest = MarkupElement::new("manifest")
        .with_attribute("xmlns:android", ANDROID_XMLNS)
        .with_attribute("android:versionCode", &spec.version_code)
        .with_attribute("android:versionName", &spec.version_name)
        .with_attribute("package", &spec.package);

    manifest.add_child(
        MarkupElement::new("supports-screens")
            .with_attribute("android:smallScreens", "true")
            .with_attribute("android:normalScreens", "true")
            .with_attribute("android:largeScreens", "true")
            .with_attribute("android:anyDensity", "true"),
    );

    manifest.add_child(
        MarkupElement::new("uses-sdk")
            .with_attribute("android:minSdkVersion", spec.min_sdk.to_string())
            .with_attribute("android:targetSdkVersion", spec.min_sdk.to_string()),
    );

    for permission in &spec.permissions {
        manifest.add_child(
            MarkupElement::new("uses-permission").with_attribute("android:name", permission),
        );
    }

    if spec.requires_gles2 {
        manifest.add_child(
            MarkupElement::new("uses-feature")
                .with_attribute("android:glEsVersion", "0x00020000")
                .with_attribute("android:required", "true"),
        );
    }

    let app = manifest.add_child(
        MarkupElement::new("application").with_attribute("android:label", "@string/app_name"),
    );

    if !spec.theme.is_empty() {
        app.set_attribute("android:theme", &spec.theme);
    }
    if spec.has_icon {
        app.set_attribute("android:icon", "@drawable/icon");
    }
    if spec.min_sdk >= 11 {
        // 2D hardware acceleration slows the GL surface down.
        app.set_attribute("android:hardwareAccelerated", "false");
    }

    let activity = app.add_child(
        MarkupElement::new("activity")
            .with_attribute("android:name", &spec.activity_name)
            .with_attribute("android:label", "@string/app_name")
            .with_attribute("android:configChanges", "keyboardHidden|orientation|screenSize")
            .with_attribute("android:screenOrientation", &spec.screen_orientation),
    );

    let intent = activity.add_child(MarkupElement::new("intent-filter"));
    intent.add_child(
        MarkupElement::new("action").with_attribute("android:name", "android.intent.action.MAIN"),
    );
    intent.add_child(
        MarkupElement::new("category")
            .with_attribute("android:name", "android.intent.category.LAUNCHER"),
    );

    manifest
}
