//! String-resource document assembly.

use crate::markup::MarkupElement;

/// Build the `values/string.xml` document carrying the app name.
pub fn build_string_resources(app_name: &str) -> MarkupElement {
    MarkupElement::new("resources").with_child(
        MarkupElement::new("string")
            .with_attribute("name", "app_name")
            .with_text(app_name),
    )
}
