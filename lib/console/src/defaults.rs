//! The built-in sample session that a console starts with and returns to on reset.

/// The public DBpedia SPARQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://dbpedia.org/sparql";

/// Looks up songs written by Elvis Costello together with their artists.
pub const DEFAULT_QUERY: &str = r#"{
  label
  writer(label: "Elvis Costello")
  artist { label }
}"#;

/// Maps the fields of [`DEFAULT_QUERY`] to RDFS and DBpedia properties.
pub const DEFAULT_CONTEXT: &str = r#"{
  "@context": {
    "label": {
        "@id": "http://www.w3.org/2000/01/rdf-schema#label",
        "@language": "en" },
    "writer": { "@id": "http://dbpedia.org/property/writer" },
    "artist": { "@id": "http://dbpedia.org/ontology/artist" }
  }
}"#;
