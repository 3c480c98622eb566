use crate::error::GrappaServerError;
use anyhow::anyhow;
use grappa_console::metadata::app_metadata;
use grappa_console::{JsonTree, NodeKind, OutputFormat, QueryConsole, Rendering};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;
use std::fmt::{self, Write};

const STYLE: &str = r#"
body { background-color: #073642; color: #93a1a1; font-family: sans-serif; margin: 0; }
.navbar { background-color: #002b36; padding: 10px 20px; font-size: 1.25em; color: white; }
.container { padding: 20px; }
label { color: white; display: block; margin: 6px 0; }
input, textarea, select { background-color: #002b36; color: #657b83; border: 1px solid gray; width: 100%; box-sizing: border-box; margin-bottom: 10px; }
textarea { height: 200px; resize: none; overflow-y: scroll; font-family: monospace; }
.editors { display: flex; gap: 10px; }
.editors > div { flex: 1; }
.result { border: 1px solid gray; border-radius: 3px; min-height: 150px; text-align: left; padding-left: 10px; }
.placeholder { height: 10px; }
.status { color: red; }
.tree ul { list-style: none; margin: 0; padding-left: 18px; }
.tree .key { color: #b58900; }
.tree .string { color: #2aa198; }
.tree .number, .tree .boolean { color: #d33682; }
.tree .null { color: #6c71c4; }
a { color: #268bd2; }
"#;

/// Renders the full console page.
pub fn render_page(console: &QueryConsole) -> Result<String, GrappaServerError> {
    let mut out = String::new();
    write_page(&mut out, console)
        .map_err(|e| GrappaServerError::Internal(anyhow!("Could not render page: {e}")))?;
    Ok(out)
}

fn write_page(out: &mut String, console: &QueryConsole) -> fmt::Result {
    let config = console.config();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Grappa</title>")?;
    writeln!(out, "<style>{STYLE}</style>")?;
    write_json_ld(out, &app_metadata())?;
    if let Some(metadata) = console.result_metadata() {
        write_json_ld(out, &metadata)?;
    }
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(
        out,
        "<nav class=\"navbar\">Grappa : A GraphQL-SPARQL-Bridge test tool</nav>"
    )?;
    writeln!(out, "<main class=\"container\">")?;
    writeln!(
        out,
        "<form method=\"post\" action=\"{}\">",
        encode_double_quoted_attribute(console.page_url().path())
    )?;

    writeln!(out, "<label for=\"endpoint\">SPARQL Endpoint:</label>")?;
    writeln!(
        out,
        "<input id=\"endpoint\" name=\"endpoint\" value=\"{}\">",
        encode_double_quoted_attribute(&config.endpoint)
    )?;

    writeln!(out, "<div class=\"editors\">")?;
    write_textarea(out, "query", "GraphQL:", &config.query)?;
    write_textarea(out, "context", "Context:", &config.context)?;
    writeln!(out, "</div>")?;

    writeln!(out, "<label for=\"format\">Output format:</label>")?;
    writeln!(out, "<select id=\"format\" name=\"format\">")?;
    for format in OutputFormat::ALL {
        let selected = if format == config.format {
            " selected"
        } else {
            ""
        };
        writeln!(
            out,
            "<option value=\"{}\"{selected}>{}</option>",
            format.tag(),
            format.label()
        )?;
    }
    writeln!(out, "</select>")?;

    for (action, label) in [
        ("execute", "Execute"),
        ("clear", "Clear"),
        ("reset", "Reset"),
        ("update", "Apply format"),
    ] {
        writeln!(
            out,
            "<button type=\"submit\" name=\"action\" value=\"{action}\">{label}</button>"
        )?;
    }

    writeln!(out, "<label>Query result:</label>")?;
    writeln!(out, "<div class=\"result\">")?;
    write_rendering(out, &console.render())?;
    if let Some(status) = console.status() {
        writeln!(out, "<p class=\"status\">{}</p>", encode_text(status))?;
    }
    writeln!(out, "</div>")?;
    writeln!(out, "</form>")?;

    let permalink = console.permalink();
    writeln!(
        out,
        "<p><a class=\"permalink\" href=\"{}\">Permalink</a></p>",
        encode_double_quoted_attribute(permalink.as_str())
    )?;
    writeln!(out, "</main>")?;

    writeln!(
        out,
        "<script>history.replaceState(null, \"\", {});</script>",
        script_safe(&Value::String(console.address().to_string()))
    )?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_textarea(out: &mut String, name: &str, label: &str, text: &str) -> fmt::Result {
    writeln!(out, "<div>")?;
    writeln!(out, "<label for=\"{name}\">{label}</label>")?;
    writeln!(
        out,
        "<textarea id=\"{name}\" name=\"{name}\" rows=\"10\">{}</textarea>",
        encode_text(text)
    )?;
    writeln!(out, "</div>")
}

fn write_rendering(out: &mut String, rendering: &Rendering) -> fmt::Result {
    match rendering {
        Rendering::Placeholder => writeln!(out, "<div class=\"placeholder\"></div>"),
        Rendering::Tree(tree) => {
            write!(out, "<div class=\"tree\">")?;
            write_tree(out, tree)?;
            writeln!(out, "</div>")
        }
        Rendering::Compact(text) => writeln!(out, "<code>{}</code>", encode_text(text)),
        Rendering::Formatted(text) => writeln!(out, "<pre>{}</pre>", encode_text(text)),
    }
}

fn write_tree(out: &mut String, node: &JsonTree) -> fmt::Result {
    let key = encode_text(&node.label);
    let summary = encode_text(&node.summary);
    if !node.is_container() {
        return write!(
            out,
            "<span class=\"key\">{key}</span>: <span class=\"{}\">{summary}</span>",
            kind_class(node.kind)
        );
    }

    let open = if node.expanded_by_default() {
        " open"
    } else {
        ""
    };
    write!(
        out,
        "<details{open}><summary><span class=\"key\">{key}</span>: {summary}</summary><ul>"
    )?;
    for child in &node.children {
        write!(out, "<li>")?;
        write_tree(out, child)?;
        write!(out, "</li>")?;
    }
    write!(out, "</ul></details>")
}

fn kind_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Object => "object",
        NodeKind::Array => "array",
        NodeKind::String => "string",
        NodeKind::Number => "number",
        NodeKind::Boolean => "boolean",
        NodeKind::Null => "null",
    }
}

fn write_json_ld(out: &mut String, document: &Value) -> fmt::Result {
    writeln!(
        out,
        "<script type=\"application/ld+json\">{}</script>",
        script_safe(document)
    )
}

/// Serializes `value` so that it cannot close the surrounding script element.
fn script_safe(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
