//! Command implementations and argument parsing for the atoll CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atoll_core::{
    Category, CategoryStore, HierarchyError, LabelMode, LabelTree, build_tree, islands, label_of,
    parents_of,
};
use atoll_providers_memory::{MemoryStore, TaxonomyDoc, TaxonomyError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Indentation unit used for nested text output.
const INDENT: &str = "    ";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "atoll", about = "Query a category taxonomy.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render the nested category tree.
    Tree(QueryArgs),
    /// Render the similarity islands.
    Islands(QueryArgs),
    /// Render the ancestor chain of a category, root first.
    Parents(ParentsArgs),
}

/// Options shared by the tree and islands commands.
#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    /// Path to a taxonomy JSON document.
    pub path: PathBuf,

    /// Category to query from (defaults to the root).
    #[arg(long)]
    pub node: Option<String>,

    /// Label projection for the output.
    #[arg(long, value_enum, default_value_t = LabelArg::Name)]
    pub by: LabelArg,
}

/// Options accepted by the `parents` command.
#[derive(Debug, Args, Clone)]
pub struct ParentsArgs {
    /// Path to a taxonomy JSON document.
    pub path: PathBuf,

    /// Category whose ancestors are listed.
    #[arg(long)]
    pub node: String,

    /// Label projection for the output.
    #[arg(long, value_enum, default_value_t = LabelArg::Name)]
    pub by: LabelArg,
}

/// Label projections exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelArg {
    /// Plain display names.
    Name,
    /// Anchor tags embedding the canonical URL.
    Link,
}

impl From<LabelArg> for LabelMode {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::Name => Self::ByName,
            LabelArg::Link => Self::ByLink,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the taxonomy document.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The taxonomy document failed to parse or resolve.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),
    /// The requested query node does not exist.
    #[error("category `{name}` does not exist in the taxonomy")]
    UnknownNode {
        /// Name supplied on the command line.
        name: String,
    },
    /// The query core rejected the loaded forest.
    #[error(transparent)]
    Core(#[from] HierarchyError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct QuerySummary {
    /// Name reported by the backing store.
    pub taxonomy: String,
    /// Structured query result, rendered by [`render_summary`].
    pub output: QueryOutput,
}

/// Structured results produced by the commands.
#[derive(Debug, Clone)]
pub enum QueryOutput {
    /// Nested tree from the `tree` command.
    Tree(LabelTree),
    /// Sorted islands from the `islands` command.
    Islands(Vec<Vec<String>>),
    /// Ancestor labels from the `parents` command, root first.
    Parents(Vec<String>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, resolving, or querying fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use atoll_cli::cli::{Cli, Command, QueryArgs, LabelArg, QueryOutput, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), r#"{ "root": "root", "categories": [{ "name": "Books" }] }"#)?;
/// let cli = Cli {
///     command: Command::Islands(QueryArgs {
///         path: file.path().to_path_buf(),
///         node: None,
///         by: LabelArg::Name,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let QueryOutput::Islands(islands) = summary.output else { unreachable!() };
/// assert_eq!(islands, vec![vec!["Books".to_owned()]]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<QuerySummary, CliError> {
    match cli.command {
        Command::Tree(args) => {
            Span::current().record("command", field::display("tree"));
            run_tree(args)
        }
        Command::Islands(args) => {
            Span::current().record("command", field::display("islands"));
            run_islands(args)
        }
        Command::Parents(args) => {
            Span::current().record("command", field::display("parents"));
            run_parents(args)
        }
    }
}

#[instrument(name = "cli.tree", err, skip(args), fields(path = %args.path.display()))]
fn run_tree(args: QueryArgs) -> Result<QuerySummary, CliError> {
    let store = load_store(&args.path)?;
    let node = resolve_node(&store, args.node.as_deref())?;
    let tree = build_tree(&store, &node, args.by.into())?;
    info!(taxonomy = store.name(), node = %node.id(), "tree built");
    Ok(QuerySummary {
        taxonomy: store.name().to_owned(),
        output: QueryOutput::Tree(tree),
    })
}

#[instrument(name = "cli.islands", err, skip(args), fields(path = %args.path.display()))]
fn run_islands(args: QueryArgs) -> Result<QuerySummary, CliError> {
    let store = load_store(&args.path)?;
    let node = resolve_node(&store, args.node.as_deref())?;
    let result = islands(&store, store.root(), &node, args.by.into());
    info!(taxonomy = store.name(), islands = result.len(), "islands computed");
    Ok(QuerySummary {
        taxonomy: store.name().to_owned(),
        output: QueryOutput::Islands(result),
    })
}

#[instrument(name = "cli.parents", err, skip(args), fields(path = %args.path.display()))]
fn run_parents(args: ParentsArgs) -> Result<QuerySummary, CliError> {
    let store = load_store(&args.path)?;
    let node = resolve_node(&store, Some(&args.node))?;
    let mode: LabelMode = args.by.into();
    let chain = parents_of(&store, &node)?
        .iter()
        .map(|ancestor| label_of(ancestor, mode))
        .collect();
    Ok(QuerySummary {
        taxonomy: store.name().to_owned(),
        output: QueryOutput::Parents(chain),
    })
}

#[instrument(name = "cli.load_store", err, fields(path = %path.display()))]
fn load_store(path: &Path) -> Result<MemoryStore, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TaxonomyDoc::from_json_str(&raw)?.into_store()?)
}

/// Resolves the query node by display name; `None` selects the root.
fn resolve_node(store: &MemoryStore, name: Option<&str>) -> Result<Category, CliError> {
    let Some(name) = name else {
        return Ok(store.get(store.root()).map_err(HierarchyError::from)?);
    };
    store
        .categories()
        .into_iter()
        .find(|category| category.name() == name)
        .ok_or_else(|| CliError::UnknownNode {
            name: name.to_owned(),
        })
}

/// Renders `summary` to `writer` as indented nested text.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &QuerySummary, mut writer: impl Write) -> io::Result<()> {
    match &summary.output {
        QueryOutput::Tree(tree) => render_tree(tree, &mut writer),
        QueryOutput::Islands(islands) => {
            for island in islands {
                writeln!(writer, "island:")?;
                for label in island {
                    writeln!(writer, "{INDENT}{label}")?;
                }
            }
            Ok(())
        }
        QueryOutput::Parents(chain) => {
            for label in chain {
                writeln!(writer, "{label}")?;
            }
            Ok(())
        }
    }
}

fn render_tree(tree: &LabelTree, writer: &mut impl Write) -> io::Result<()> {
    let mut stack: Vec<(usize, &String, &LabelTree)> = tree
        .entries()
        .iter()
        .rev()
        .map(|(label, subtree)| (0, label, subtree))
        .collect();
    while let Some((depth, label, subtree)) = stack.pop() {
        writeln!(writer, "{}{label}", INDENT.repeat(depth))?;
        for (child, grandchildren) in subtree.entries().iter().rev() {
            stack.push((depth + 1, child, grandchildren));
        }
    }
    Ok(())
}
