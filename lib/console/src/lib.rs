#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod client;
mod config;
mod console;
pub mod defaults;
mod error;
mod format;
pub mod metadata;
mod params;
mod permalink;
mod render;
mod tree;

pub use client::{ClientFactory, TranslationClient, TranslationError};
pub use config::SessionConfig;
pub use console::{ExecutionOutcome, PendingExecution, QueryConsole};
pub use error::ConsoleError;
pub use format::OutputFormat;
pub use params::ConsoleParams;
pub use permalink::{bare_page_url, compute_permalink};
pub use render::{render_result, Rendering};
pub use tree::{JsonTree, NodeKind};
