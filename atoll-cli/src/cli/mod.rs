//! Command-line interface for querying a category taxonomy.
//!
//! Loads a taxonomy JSON document into the in-memory store and renders the
//! structural queries (nested tree, similarity islands, ancestor chain) as
//! indented text. The core returns structured values; everything printable
//! lives here.

mod commands;

pub use commands::{
    Cli, CliError, Command, LabelArg, ParentsArgs, QueryArgs, QueryOutput, QuerySummary,
    render_summary, run_cli,
};
