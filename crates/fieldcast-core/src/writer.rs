//! Tree-to-text XML printer
//!
//! Renders a finished [`Document`](crate::tree::Document) as indented XML
//! with a UTF-8 declaration. Indentation width is a configuration option,
//! not a correctness requirement.

use crate::tree::{Document, Element};

/// Printer configuration
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Emit the `<?xml ...?>` declaration line
    pub declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            declaration: true,
        }
    }
}

/// Indented XML renderer
#[derive(Debug, Clone, Default)]
pub struct XmlWriter {
    config: WriterConfig,
}

impl XmlWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Render the document to a string
    pub fn write(&self, document: &Document) -> String {
        let mut out = String::new();
        if self.config.declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        self.write_element(&mut out, document.root(), 0);
        out
    }

    fn write_element(&self, out: &mut String, element: &Element, depth: usize) {
        let pad = " ".repeat(depth * self.config.indent_width);
        if let Some(text) = element.text() {
            out.push_str(&format!(
                "{}<{}>{}</{}>\n",
                pad,
                element.name(),
                escape(text),
                element.name()
            ));
        } else if element.children().is_empty() {
            out.push_str(&format!("{}<{}/>\n", pad, element.name()));
        } else {
            out.push_str(&format!("{}<{}>\n", pad, element.name()));
            for child in element.children() {
                self.write_element(out, child, depth + 1);
            }
            out.push_str(&format!("{}</{}>\n", pad, element.name()));
        }
    }
}

/// Escape XML-reserved characters in text content
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
