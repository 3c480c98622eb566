//! JSON-LD blocks that hosts embed as structured page metadata.

use serde_json::{json, Map, Value};

/// Describes the console itself as a `schema:SoftwareApplication`.
pub fn app_metadata() -> Value {
    json!({
        "@context": {
            "rdf": "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
            "schema": "http://schema.org/",
            "skos": "http://www.w3.org/2004/02/skos/core#"
        },
        "@id": "#this",
        "@type": "schema:SoftwareApplication",
        "schema:description": "Provides a testbed for exercising a GraphQL to SPARQL bridge.",
        "schema:name": "Grappa",
        "skos:altLabel": "Grappa",
        "schema:relatedLink": {
            "@id": "https://github.com/OpenLinkSoftware/Grappa/tree/develop"
        }
    })
}

/// Combines the parsed context with a query result into a JSON-LD document.
///
/// The `@context` member of `context` is used when present, otherwise the
/// whole value. Object results receive the context next to their own members,
/// any other result is placed under `@graph`. Returns `None` without a result.
pub fn result_metadata(context: Option<&Value>, result: Option<&Value>) -> Option<Value> {
    let result = result?;
    let context = context.map(|context| context.get("@context").unwrap_or(context).clone());

    let mut document = match result {
        Value::Object(members) => members.clone(),
        other => {
            let mut members = Map::new();
            members.insert("@graph".to_owned(), other.clone());
            members
        }
    };
    if let Some(context) = context {
        document.insert("@context".to_owned(), context);
    }
    Some(Value::Object(document))
}
