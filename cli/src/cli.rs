use clap::{Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(about, version, name = "grappa")]
/// Grappa: a testbed for exercising a GraphQL to SPARQL bridge
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the query console web server
    Serve {
        /// Host and port to listen to
        #[arg(short, long, default_value = "localhost:7878", value_hint = ValueHint::Hostname)]
        bind: String,
        /// URL of the GraphQL-LD translation service
        #[arg(long, value_hint = ValueHint::Url)]
        bridge: Url,
        /// Timeout in seconds for a translation request
        #[arg(long, default_value_t = 60)]
        timeout: u64,
        /// Externally visible URL of the console page, used for permalinks
        ///
        /// By default it is derived from the bind address.
        #[arg(long, value_hint = ValueHint::Url)]
        public_url: Option<Url>,
        /// Allows cross-origin requests
        #[arg(long)]
        cors: bool,
    },
    /// Execute a GraphQL query once and print the result
    Query {
        /// URL of the GraphQL-LD translation service
        #[arg(long, value_hint = ValueHint::Url)]
        bridge: Url,
        /// Timeout in seconds for a translation request
        #[arg(long, default_value_t = 60)]
        timeout: u64,
        /// Console permalink to take the session from
        ///
        /// The other session options override its parameters.
        #[arg(long, value_hint = ValueHint::Url)]
        permalink: Option<Url>,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the permalink of a console session
    Permalink {
        /// URL of the console page
        #[arg(long, default_value = "http://localhost:7878/app", value_hint = ValueHint::Url)]
        base: Url,
        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Session options. Absent options keep the built-in defaults.
#[derive(ClapArgs)]
pub struct SessionArgs {
    /// SPARQL endpoint the query is evaluated against
    #[arg(short, long, value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,
    /// GraphQL query
    #[arg(short, long, conflicts_with = "query_file")]
    pub query: Option<String>,
    /// File to read the GraphQL query from
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub query_file: Option<PathBuf>,
    /// JSON-LD context
    #[arg(short, long, conflicts_with = "context_file")]
    pub context: Option<String>,
    /// File to read the JSON-LD context from
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub context_file: Option<PathBuf>,
    /// Output format: fmt_tree, fmt_json or fmt_json_formatted
    #[arg(short, long)]
    pub format: Option<String>,
}
