//! Script element tree and renderer.

use serde::{Deserialize, Serialize};

const INDENT: &str = "    ";

/// One node in a generated script: a literal statement, a `key = value`
/// assignment, or a named block of child elements.
///
/// Values are stored pre-quoted/escaped by the producer; the renderer
/// emits them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptElement {
    /// A literal line, rendered verbatim at the current indent.
    Statement(String),

    /// An assignment, rendered as `key = value`.
    KeyValue { key: String, value: String },

    /// A named block: `name {`, children one level deeper, `}`.
    Block {
        name: String,
        children: Vec<ScriptElement>,
    },
}

impl ScriptElement {
    /// Shorthand for a literal statement.
    pub fn statement(s: impl Into<String>) -> Self {
        ScriptElement::Statement(s.into())
    }

    /// Shorthand for an assignment. The value must already carry any
    /// quoting it needs.
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        ScriptElement::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// An empty named block.
    pub fn block(name: impl Into<String>) -> Self {
        ScriptElement::Block {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child to a block. Statements and assignments are leaves;
    /// pushing onto one is a producer defect.
    pub fn push(&mut self, child: ScriptElement) {
        match self {
            ScriptElement::Block { children, .. } => children.push(child),
            _ => unreachable!("push on a non-block script element"),
        }
    }

    /// Builder-style `push`.
    pub fn with_child(mut self, child: ScriptElement) -> Self {
        self.push(child);
        self
    }

    /// Render the tree at indent level zero. A top-level block is
    /// followed by a blank line so consecutive blocks in one file stay
    /// separated.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_indented(0, &mut out);
        out
    }

    fn render_indented(&self, level: usize, out: &mut String) {
        match self {
            ScriptElement::Statement(s) => {
                push_indent(level, out);
                out.push_str(s);
                out.push('\n');
            }
            ScriptElement::KeyValue { key, value } => {
                push_indent(level, out);
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            ScriptElement::Block { name, children } => {
                push_indent(level, out);
                out.push_str(name);
                out.push_str(" {\n");

                for child in children {
                    child.render_indented(level + 1, out);
                }

                push_indent(level, out);
                out.push_str("}\n");

                if level == 0 {
                    out.push('\n');
                }
            }
        }
    }
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}
