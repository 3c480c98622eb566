use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the result of the last execution is presented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OutputFormat {
    /// A collapsible tree.
    #[default]
    Tree,
    /// Single-line JSON without any whitespace.
    JsonCompact,
    /// JSON pretty-printed with an indentation of two spaces.
    JsonFormatted,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Tree,
        OutputFormat::JsonCompact,
        OutputFormat::JsonFormatted,
    ];

    /// The tag used in page parameters and forms.
    pub fn tag(self) -> &'static str {
        match self {
            OutputFormat::Tree => "fmt_tree",
            OutputFormat::JsonCompact => "fmt_json",
            OutputFormat::JsonFormatted => "fmt_json_formatted",
        }
    }

    /// A human-readable name for selection widgets.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Tree => "Tree",
            OutputFormat::JsonCompact => "JSON",
            OutputFormat::JsonFormatted => "JSON (formatted)",
        }
    }

    /// Resolves a tag. Unknown tags fall back to [`OutputFormat::JsonFormatted`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "fmt_tree" => OutputFormat::Tree,
            "fmt_json" => OutputFormat::JsonCompact,
            _ => OutputFormat::JsonFormatted,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for OutputFormat {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<OutputFormat> for String {
    fn from(value: OutputFormat) -> Self {
        value.tag().to_owned()
    }
}
