use crate::config::BridgeConfig;
use crate::error::BridgeError;
use async_trait::async_trait;
use grappa_console::{ClientFactory, TranslationClient, TranslationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

#[derive(Serialize)]
struct TranslationRequest<'a> {
    query: &'a str,
    context: Option<&'a Value>,
    endpoint: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Creates [`HttpBridgeClient`]s that share one connection pool.
pub struct HttpBridgeFactory {
    http: reqwest::Client,
    config: BridgeConfig,
}

impl HttpBridgeFactory {
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl ClientFactory for HttpBridgeFactory {
    fn create(
        &self,
        context: Option<&Value>,
        endpoint: &Url,
    ) -> Result<Arc<dyn TranslationClient>, TranslationError> {
        let context = match context {
            None | Some(Value::Null) => None,
            Some(Value::Object(_)) => context.cloned(),
            Some(Value::Array(_)) => return Err(BridgeError::InvalidContext("an array").into()),
            Some(Value::String(_)) => return Err(BridgeError::InvalidContext("a string").into()),
            Some(Value::Number(_)) => return Err(BridgeError::InvalidContext("a number").into()),
            Some(Value::Bool(_)) => return Err(BridgeError::InvalidContext("a boolean").into()),
        };
        tracing::debug!(
            "Binding translation client to {endpoint} via {}",
            self.config.url
        );
        Ok(Arc::new(HttpBridgeClient {
            http: self.http.clone(),
            bridge: self.config.url.clone(),
            endpoint: endpoint.clone(),
            context,
        }))
    }
}

/// A translation client bound to one JSON-LD context and SPARQL endpoint.
pub struct HttpBridgeClient {
    http: reqwest::Client,
    bridge: Url,
    endpoint: Url,
    context: Option<Value>,
}

impl HttpBridgeClient {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, query: &str) -> Result<Value, BridgeError> {
        let request = TranslationRequest {
            query,
            context: self.context.as_ref(),
            endpoint: self.endpoint.as_str(),
        };
        let response = self
            .http
            .post(self.bridge.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(error) => {
                    tracing::debug!("Could not read error body of translation service: {error}");
                    String::new()
                }
            };
            return Err(BridgeError::Status { status, body });
        }

        let response: GraphQlResponse = response.json().await?;
        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            return Err(BridgeError::Query(
                errors.into_iter().map(|error| error.message).collect(),
            ));
        }
        response.data.ok_or(BridgeError::MissingData)
    }
}

#[async_trait]
impl TranslationClient for HttpBridgeClient {
    async fn query(&self, query: &str) -> Result<Value, TranslationError> {
        tracing::debug!("Posting query for {} to {}", self.endpoint, self.bridge);
        Ok(self.send(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn factory(server: &MockServer) -> HttpBridgeFactory {
        let url = Url::parse(&format!("{}/translate", server.uri())).unwrap();
        HttpBridgeFactory::new(BridgeConfig::new(url)).unwrap()
    }

    fn endpoint() -> Url {
        Url::parse("http://dbpedia.org/sparql").unwrap()
    }

    #[tokio::test]
    async fn posts_query_context_and_endpoint() {
        let server = MockServer::start().await;
        let context = json!({"@context": {"label": "http://www.w3.org/2000/01/rdf-schema#label"}});

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(json!({
                "query": "{ label }",
                "context": context,
                "endpoint": "http://dbpedia.org/sparql"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"label": "Jailhouse Rock"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = factory(&server).create(Some(&context), &endpoint()).unwrap();
        let data = client.query("{ label }").await.unwrap();
        assert_eq!(data, json!({"label": "Jailhouse Rock"}));
    }

    #[tokio::test]
    async fn graphql_errors_fail_the_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{"message": "Unknown field 'foo'"}, {"message": "No context"}]
            })))
            .mount(&server)
            .await;

        let client = factory(&server).create(None, &endpoint()).unwrap();
        let error = client.query("{ foo }").await.unwrap_err();
        assert_eq!(error.to_string(), "Unknown field 'foo'; No context");
    }

    #[tokio::test]
    async fn non_success_status_fails_the_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("endpoint unreachable"))
            .mount(&server)
            .await;

        let client = factory(&server).create(None, &endpoint()).unwrap();
        let error = client.query("{ label }").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Translation service responded with 502 Bad Gateway: endpoint unreachable"
        );
    }

    #[tokio::test]
    async fn missing_data_fails_the_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = factory(&server).create(None, &endpoint()).unwrap();
        let error = client.query("{ label }").await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "Translation service response contains no data"
        );
    }

    #[tokio::test]
    async fn non_object_context_is_rejected() {
        let server = MockServer::start().await;
        let error = factory(&server)
            .create(Some(&json!(["label"])), &endpoint())
            .err()
            .unwrap();
        assert_eq!(
            error.to_string(),
            "The JSON-LD context must be an object, found an array"
        );
    }
}
