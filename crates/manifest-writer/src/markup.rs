//! Markup element tree and XML renderer.

use std::io::Cursor;

use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

/// Writer errors
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<WriteError> for droidgen_core::ExportError {
    fn from(err: WriteError) -> Self {
        droidgen_core::ExportError::Markup(err.to_string())
    }
}

/// One node of a manifest-like hierarchical document: a tag name,
/// attributes in insertion order, child elements, and optional text
/// content. Text is escaped at render time; attribute values are taken
/// as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<MarkupElement>,
    pub text: Option<String>,
}

impl MarkupElement {
    /// A new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute; re-setting a key keeps its original position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder-style `set_attribute`.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a child element and return a reference to it.
    pub fn add_child(&mut self, child: MarkupElement) -> &mut MarkupElement {
        self.children.push(child);
        self.children.last_mut().unwrap()
    }

    /// Builder-style `add_child`.
    pub fn with_child(mut self, child: MarkupElement) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Render the tree as a complete XML document with declaration and
    /// 4-space indentation.
    pub fn to_xml_string(&self) -> Result<String, WriteError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write_element(&mut writer)?;

        let bytes = writer.into_inner().into_inner();
        let mut out = String::from_utf8(bytes)?;
        out.push('\n');
        Ok(out)
    }

    fn write_element<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), WriteError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;

        if let Some(ref text) = self.text {
            // BytesText::new escapes the markup's reserved characters.
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }

        for child in &self.children {
            child.write_element(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}
