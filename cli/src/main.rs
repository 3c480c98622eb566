#![allow(clippy::print_stdout)]
use crate::cli::{Args, Command, SessionArgs};
use anyhow::{bail, Context};
use clap::Parser;
use grappa_bridge::{BridgeConfig, HttpBridgeFactory};
use grappa_console::{
    compute_permalink, ClientFactory, ConsoleParams, OutputFormat, QueryConsole, SessionConfig,
};
use grappa_web::ServerConfig;
use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;

const DEFAULT_LOG_FILTER: &str = "grappa_bridge=info,grappa_console=info,grappa_web=info,tower_http=info";

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(io::stderr)
        .init();

    let matches = Args::parse();
    match matches.command {
        Command::Serve {
            bind,
            bridge,
            timeout,
            public_url,
            cors,
        } => {
            let server_config = ServerConfig {
                factory: bridge_factory(bridge, timeout)?,
                bind,
                cors,
                public_url,
            };
            grappa_web::serve(server_config).await
        }
        Command::Query {
            bridge,
            timeout,
            permalink,
            session,
        } => {
            let page_url = match permalink {
                Some(permalink) => permalink,
                None => Url::parse("http://localhost:7878/app")?,
            };
            let mut console = QueryConsole::initialize(bridge_factory(bridge, timeout)?, &page_url);
            let params = session_params(session)?;
            if let Some(endpoint) = params.endpoint {
                console.edit_endpoint(endpoint);
            }
            if let Some(query) = params.query {
                console.edit_query(query);
            }
            if let Some(context) = params.context {
                console.edit_context(context);
            }
            if let Some(format) = params.format {
                console.edit_output_format(OutputFormat::from_tag(&format));
            }

            console.execute().await;
            if let Some(status) = console.status() {
                bail!("{status}");
            }
            println!("{}", console.render().to_string().trim_end());
            tracing::info!("Permalink: {}", console.permalink());
            Ok(())
        }
        Command::Permalink { base, session } => {
            let config = SessionConfig::from_params(&session_params(session)?);
            println!("{}", compute_permalink(&base, &config));
            Ok(())
        }
    }
}

fn bridge_factory(bridge: Url, timeout: u64) -> anyhow::Result<Arc<dyn ClientFactory>> {
    let config = BridgeConfig {
        url: bridge,
        timeout: Duration::from_secs(timeout),
    };
    let factory = HttpBridgeFactory::new(config).context("Cannot set up the bridge client")?;
    Ok(Arc::new(factory))
}

/// Collects the session options, reading query and context files.
fn session_params(session: SessionArgs) -> anyhow::Result<ConsoleParams> {
    let query = match (session.query, session.query_file) {
        (Some(query), _) => Some(query),
        (None, Some(file)) => Some(
            fs::read_to_string(&file)
                .with_context(|| format!("Cannot read query file {}", file.display()))?,
        ),
        (None, None) => None,
    };
    let context = match (session.context, session.context_file) {
        (Some(context), _) => Some(context),
        (None, Some(file)) => Some(
            fs::read_to_string(&file)
                .with_context(|| format!("Cannot read context file {}", file.display()))?,
        ),
        (None, None) => None,
    };
    Ok(ConsoleParams {
        endpoint: session.endpoint,
        query,
        context,
        format: session.format,
    })
}
