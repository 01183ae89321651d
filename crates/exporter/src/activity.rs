//! Activity source emission.
//!
//! The generated project carries one Java activity class under
//! `app/src/main/java`. Its body comes from a caller-supplied template
//! (this tool vendors no payloads, same as the wrapper jar); emission
//! substitutes the package and class-name placeholders and trims
//! trailing blank lines before writing.

use droidgen_core::Result;

use crate::assembler::Assembler;
use crate::emit::Emitter;

/// Template placeholder replaced by the activity's simple class name.
pub const CLASS_NAME_TOKEN: &str = "__ACTIVITY_CLASS__";

/// Template placeholder replaced by the activity's package.
pub const PACKAGE_TOKEN: &str = "__ACTIVITY_PACKAGE__";

/// Render the template and write it as
/// `app/src/main/java/<package path>/<ClassName>.java`.
pub fn write_activity_source(
    emitter: &Emitter,
    asm: &Assembler<'_>,
    template: &str,
) -> Result<()> {
    let package = asm.activity_package()?;
    let class_name = asm.activity_name()?;

    let rel = format!(
        "app/src/main/java/{}/{}.java",
        package.replace('.', "/"),
        class_name
    );
    emitter.write_text(rel, &render(template, &package, &class_name))?;
    Ok(())
}

fn render(template: &str, package: &str, class_name: &str) -> String {
    let mut out = template
        .replace(PACKAGE_TOKEN, package)
        .replace(CLASS_NAME_TOKEN, class_name);

    while out.ends_with("\n\n") {
        out.pop();
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
