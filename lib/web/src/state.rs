use grappa_console::{bare_page_url, ClientFactory, OutputFormat, PendingExecution, QueryConsole};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Shared state of the server: the hosted console and its page URL.
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<Mutex<QueryConsole>>,
    /// The console page URL without parameters.
    pub page_url: Url,
}

/// Field values submitted by the user. Absent fields are left untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConsoleEdits {
    pub endpoint: Option<String>,
    pub query: Option<String>,
    pub context: Option<String>,
    pub format: Option<OutputFormat>,
}

impl AppState {
    pub fn new(factory: Arc<dyn ClientFactory>, page_url: Url) -> Self {
        let console = QueryConsole::initialize(factory, &page_url);
        Self {
            console: Arc::new(Mutex::new(console)),
            page_url: bare_page_url(&page_url),
        }
    }

    /// Re-initializes the console from `page_url` and runs the automatic
    /// execution it schedules. Queries still in flight from before are dropped.
    pub async fn load(&self, page_url: &Url) {
        let pending = {
            let mut console = self.console.lock().await;
            console.reinitialize(page_url);
            if !console.auto_run_pending() {
                return;
            }
            console.begin_execution()
        };
        self.finish(pending).await;
    }

    /// Executes the current query. The console is not locked while the
    /// query is in flight.
    pub async fn execute(&self) {
        let pending = self.console.lock().await.begin_execution();
        self.finish(pending).await;
    }

    async fn finish(&self, pending: Option<PendingExecution>) {
        if let Some(pending) = pending {
            let outcome = pending.run().await;
            self.console.lock().await.complete(outcome);
        }
    }
}

impl ConsoleEdits {
    /// Applies every field that differs from the current config through the
    /// matching edit operation.
    pub fn apply(self, console: &mut QueryConsole) {
        if let Some(endpoint) = self.endpoint {
            if endpoint != console.config().endpoint {
                console.edit_endpoint(endpoint);
            }
        }
        if let Some(query) = self.query {
            if query != console.config().query {
                console.edit_query(query);
            }
        }
        if let Some(context) = self.context {
            if context != console.config().context {
                console.edit_context(context);
            }
        }
        if let Some(format) = self.format {
            if format != console.config().format {
                console.edit_output_format(format);
            }
        }
    }
}
