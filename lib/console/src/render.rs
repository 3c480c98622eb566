use crate::format::OutputFormat;
use crate::tree::JsonTree;
use serde_json::Value;
use std::fmt;

/// The presentation of a query result in one [`OutputFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// There is no result; hosts show an empty area of fixed minimum height.
    Placeholder,
    Tree(JsonTree),
    /// Serialized without any whitespace, shown as plain text.
    Compact(String),
    /// Serialized with an indentation of two spaces, shown preformatted.
    Formatted(String),
}

/// Renders `result` in `format`.
pub fn render_result(result: Option<&Value>, format: OutputFormat) -> Rendering {
    let Some(result) = result else {
        return Rendering::Placeholder;
    };
    match format {
        OutputFormat::Tree => Rendering::Tree(JsonTree::new(result)),
        OutputFormat::JsonCompact => Rendering::Compact(result.to_string()),
        OutputFormat::JsonFormatted => Rendering::Formatted(format!("{result:#}")),
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendering::Placeholder => Ok(()),
            Rendering::Tree(tree) => fmt::Display::fmt(tree, f),
            Rendering::Compact(text) | Rendering::Formatted(text) => f.write_str(text),
        }
    }
}
