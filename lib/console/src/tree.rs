use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The JSON type of a [`JsonTree`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A collapsible tree view of a JSON value.
///
/// Containers carry a summary such as `{} 3 keys` and their children, leaves
/// carry their JSON text. Only the root is expanded by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonTree {
    pub label: String,
    pub kind: NodeKind,
    pub summary: String,
    pub depth: usize,
    pub children: Vec<JsonTree>,
}

impl JsonTree {
    pub fn new(value: &Value) -> Self {
        Self::build("root".to_owned(), value, 0)
    }

    fn build(label: String, value: &Value, depth: usize) -> Self {
        let (kind, summary, children) = match value {
            Value::Object(map) => (
                NodeKind::Object,
                format!("{{}} {}", count(map.len(), "key")),
                map.iter()
                    .map(|(key, child)| Self::build(key.clone(), child, depth + 1))
                    .collect(),
            ),
            Value::Array(items) => (
                NodeKind::Array,
                format!("[] {}", count(items.len(), "item")),
                items
                    .iter()
                    .enumerate()
                    .map(|(index, child)| Self::build(index.to_string(), child, depth + 1))
                    .collect(),
            ),
            Value::String(_) => (NodeKind::String, value.to_string(), Vec::new()),
            Value::Number(_) => (NodeKind::Number, value.to_string(), Vec::new()),
            Value::Bool(_) => (NodeKind::Boolean, value.to_string(), Vec::new()),
            Value::Null => (NodeKind::Null, value.to_string(), Vec::new()),
        };
        Self {
            label,
            kind,
            summary,
            depth,
            children,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Object | NodeKind::Array)
    }

    pub fn expanded_by_default(&self) -> bool {
        self.depth == 0
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) -> fmt::Result {
        let child_prefix = if is_root {
            writeln!(f, "{}: {}", self.label, self.summary)?;
            String::new()
        } else {
            let (branch, indent) = if is_last {
                ("`-- ", "    ")
            } else {
                ("|-- ", "|   ")
            };
            writeln!(f, "{prefix}{branch}{}: {}", self.label, self.summary)?;
            format!("{prefix}{indent}")
        };
        for (index, child) in self.children.iter().enumerate() {
            child.write_node(f, &child_prefix, index + 1 == self.children.len(), false)?;
        }
        Ok(())
    }
}

/// Writes the fully expanded tree with ASCII branch markers.
impl fmt::Display for JsonTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, "", true, true)
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
