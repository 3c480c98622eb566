use crate::client::{ClientFactory, TranslationClient, TranslationError};
use crate::config::SessionConfig;
use crate::error::ConsoleError;
use crate::format::OutputFormat;
use crate::metadata::result_metadata;
use crate::params::ConsoleParams;
use crate::permalink::{bare_page_url, compute_permalink};
use crate::render::{render_result, Rendering};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// The interactive state behind one query console.
///
/// Holds the [`SessionConfig`], the outcome of the last execution (either a
/// result or a status message, never both) and a translation client that is
/// cached until the endpoint or the context changes.
///
/// Every transition that discards the current outcome starts a new
/// generation. Outcomes of executions started in an earlier generation are
/// dropped by [`QueryConsole::complete`], so a slow response can never
/// overwrite fresher state.
pub struct QueryConsole {
    factory: Arc<dyn ClientFactory>,
    page_url: Url,
    config: SessionConfig,
    result: Option<Value>,
    status: Option<String>,
    client: Option<Arc<dyn TranslationClient>>,
    generation: u64,
    auto_run: bool,
    address: Url,
}

/// An execution that passed validation and is ready to be sent to the client.
///
/// Running it does not borrow the console, which therefore stays editable
/// while the query is in flight.
pub struct PendingExecution {
    generation: u64,
    client: Arc<dyn TranslationClient>,
    query: String,
}

/// The settled outcome of a [`PendingExecution`].
pub struct ExecutionOutcome {
    generation: u64,
    result: Result<Value, TranslationError>,
}

impl QueryConsole {
    /// Creates a console for the page at `page_url`.
    ///
    /// The session config is seeded from the page parameters, falling back to
    /// the defaults. If endpoint, query and context were all supplied, one
    /// automatic execution is scheduled; see [`QueryConsole::run_pending`].
    pub fn initialize(factory: Arc<dyn ClientFactory>, page_url: &Url) -> Self {
        let params = ConsoleParams::from_url(page_url);
        let config = SessionConfig::from_params(&params);
        let page_url = bare_page_url(page_url);
        let address = compute_permalink(&page_url, &config);
        tracing::debug!(
            "Initialized console for {page_url} (auto-run: {})",
            params.is_complete()
        );
        Self {
            factory,
            page_url,
            config,
            result: None,
            status: None,
            client: None,
            generation: 0,
            auto_run: params.is_complete(),
            address,
        }
    }

    /// Re-initializes the console from `page_url`, as on a page reload.
    ///
    /// Behaves like [`QueryConsole::initialize`] with the same factory, except
    /// that the generation keeps counting, so outcomes of executions started
    /// before the reload are dropped.
    pub fn reinitialize(&mut self, page_url: &Url) {
        let generation = self.generation + 1;
        *self = Self::initialize(Arc::clone(&self.factory), page_url);
        self.generation = generation;
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The data returned by the last successful execution.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// The error message of the last failed execution.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether a translation client is currently cached.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// The page URL without any parameters.
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// The URL hosts should show in the address bar.
    pub fn address(&self) -> &Url {
        &self.address
    }

    pub fn permalink(&self) -> Url {
        compute_permalink(&self.page_url, &self.config)
    }

    pub fn auto_run_pending(&self) -> bool {
        self.auto_run
    }

    /// Renders the current result in the selected output format.
    pub fn render(&self) -> Rendering {
        render_result(self.result.as_ref(), self.config.format)
    }

    /// The JSON-LD document combining the context with the current result.
    pub fn result_metadata(&self) -> Option<Value> {
        let context = serde_json::from_str::<Value>(&self.config.context).ok();
        result_metadata(context.as_ref(), self.result.as_ref())
    }

    /// Runs the automatic execution scheduled by initialization, if any.
    ///
    /// Returns whether an execution took place. The schedule is consumed by
    /// the first call and by any other transition.
    pub async fn run_pending(&mut self) -> bool {
        if !self.auto_run {
            return false;
        }
        self.execute().await;
        true
    }

    /// Validates the inputs, runs the query and records its outcome.
    pub async fn execute(&mut self) {
        if let Some(pending) = self.begin_execution() {
            let outcome = pending.run().await;
            self.complete(outcome);
        }
    }

    /// Performs everything of [`QueryConsole::execute`] up to the query call.
    ///
    /// Clears the previous outcome, checks the endpoint and the context and
    /// creates the client if none is cached. Returns `None` if one of these
    /// steps failed; the failure is then recorded as the status message.
    pub fn begin_execution(&mut self) -> Option<PendingExecution> {
        self.discard_outcome();
        let started = self.prepare_client();
        let pending = match started {
            Ok(client) => Some(PendingExecution {
                generation: self.generation,
                client,
                query: self.config.query.clone(),
            }),
            Err(error) => {
                tracing::debug!("Execution did not start: {error}");
                self.status = Some(error.to_string());
                None
            }
        };
        self.refresh_address();
        pending
    }

    /// Records the outcome of an execution started by
    /// [`QueryConsole::begin_execution`].
    ///
    /// Returns `false` if the outcome was dropped because the console has
    /// moved on since the execution started.
    pub fn complete(&mut self, outcome: ExecutionOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                "Dropping outcome of generation {} (current: {})",
                outcome.generation,
                self.generation
            );
            return false;
        }
        match outcome.result {
            Ok(data) => self.result = Some(data),
            Err(error) => {
                let error = ConsoleError::from(error);
                tracing::info!("{error}");
                self.status = Some(error.to_string());
            }
        }
        self.refresh_address();
        true
    }

    pub fn edit_query(&mut self, query: impl Into<String>) {
        self.discard_outcome();
        self.config.query = query.into();
        self.refresh_address();
    }

    pub fn edit_context(&mut self, context: impl Into<String>) {
        self.discard_outcome();
        self.client = None;
        self.config.context = context.into();
        self.refresh_address();
    }

    pub fn edit_endpoint(&mut self, endpoint: impl Into<String>) {
        self.discard_outcome();
        self.client = None;
        self.config.endpoint = endpoint.into();
        self.refresh_address();
    }

    /// Changes how the current result is presented. Keeps result, status and client.
    pub fn edit_output_format(&mut self, format: OutputFormat) {
        self.auto_run = false;
        self.config.format = format;
        self.refresh_address();
    }

    pub fn clear_result(&mut self) {
        self.discard_outcome();
        self.refresh_address();
    }

    /// Restores the default session and strips all parameters from the address.
    pub fn reset_to_defaults(&mut self) {
        self.discard_outcome();
        self.client = None;
        self.config = SessionConfig::default();
        self.address = self.page_url.clone();
    }

    fn prepare_client(&mut self) -> Result<Arc<dyn TranslationClient>, ConsoleError> {
        let endpoint = parse_endpoint(&self.config.endpoint)?;
        let context = parse_context(&self.config.context)?;
        if let Some(client) = &self.client {
            return Ok(Arc::clone(client));
        }

        tracing::debug!("Creating translation client for {endpoint}");
        let client = self.factory.create(context.as_ref(), &endpoint)?;
        self.client = Some(Arc::clone(&client));
        Ok(client)
    }

    fn discard_outcome(&mut self) {
        self.auto_run = false;
        self.result = None;
        self.status = None;
        self.generation += 1;
    }

    fn refresh_address(&mut self) {
        self.address = self.permalink();
    }
}

impl PendingExecution {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sends the query to the client and waits for the response.
    pub async fn run(self) -> ExecutionOutcome {
        tracing::info!("Executing query (generation {})", self.generation);
        ExecutionOutcome {
            generation: self.generation,
            result: self.client.query(&self.query).await,
        }
    }
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConsoleError> {
    let url = Url::parse(endpoint).map_err(|e| ConsoleError::InvalidEndpoint(e.to_string()))?;
    if !url.origin().is_tuple() {
        return Err(ConsoleError::InvalidEndpoint(format!(
            "{url} has an opaque origin"
        )));
    }
    Ok(url)
}

fn parse_context(context: &str) -> Result<Option<Value>, ConsoleError> {
    if context.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(context)?))
}
