use anyhow::{Context, Result};
use biblio_analysis::Vocabulary;
use biblio_corpus::{source_for_path, CorpusSource, InMemory, SharedCorpus};
use biblio_protocol::CommandResponse;
use clap::{Args, Parser, Subcommand, ValueEnum};
use command::{CommandAction, CommandHandler, CommandRequest};
use config::BiblioConfig;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod command;
mod config;

#[derive(Parser)]
#[command(name = "biblio")]
#[command(about = "Keyword frequency and venue graphs for bibliographic corpora", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Corpus file (.bib or .json); overrides BIBLIO_CORPUS and the config file
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Config file (overrides BIBLIO_CONFIG and ./biblio.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Vocabulary file replacing the built-in categories and equivalences
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Keyword frequencies per vocabulary category
    Frequency,

    /// Term frequencies merged across categories
    WordCloud(WordCloudArgs),

    /// Most frequent value pairs of two record fields
    Pairs(PairsArgs),

    /// Venues with the most records
    Venues(VenuesArgs),

    /// Venue / article / attribute graph
    Graph(GraphArgs),

    /// Corpus inspection
    Corpus {
        #[command(subcommand)]
        query: CorpusQuery,
    },

    /// Execute a JSON command request
    Command(CommandArgs),
}

#[derive(Args)]
struct WordCloudArgs {
    /// Keep only the N most frequent terms in the chart series
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args)]
struct PairsArgs {
    field_a: String,
    field_b: String,

    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct VenuesArgs {
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct GraphArgs {
    /// Number of top venues to include
    #[arg(long)]
    venues: Option<usize>,

    /// Articles sampled per venue
    #[arg(long)]
    sample: Option<usize>,

    /// Seed for reproducible attribute assignment
    #[arg(long, conflicts_with = "attribute_field")]
    seed: Option<u64>,

    /// Read each article's attribute from this record field
    #[arg(long)]
    attribute_field: Option<String>,

    /// Keep equal titles from different venues as separate nodes
    #[arg(long)]
    per_venue_titles: bool,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Dot,
}

impl OutputFormat {
    const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        }
    }
}

#[derive(Subcommand)]
enum CorpusQuery {
    /// Number of records plus field coverage
    Count,

    /// Distinct values of a field
    Unique { field: String },

    /// Record by id
    Get { id: String },

    /// Records whose field contains the value
    Filter { field: String, value: String },
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON request (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing the JSON request
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = BiblioConfig::discover(cli.config.as_deref())?;
    let corpus = SharedCorpus::new(corpus_source(&config, cli.corpus.as_deref()));
    let vocabulary = load_vocabulary(&config, cli.vocabulary.as_deref())?;
    let handler = CommandHandler::new(corpus, vocabulary, config);

    let (request, raw_text) = request_for(cli.command)?;

    let response = handler.execute(request);
    print_response(&response, cli.pretty, raw_text)?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn corpus_source(config: &BiblioConfig, flag: Option<&Path>) -> Box<dyn CorpusSource + Send + Sync> {
    let Some(path) = config.corpus_path(flag) else {
        log::warn!("No corpus configured (use --corpus or BIBLIO_CORPUS); using an empty corpus");
        return Box::new(InMemory::new(Vec::new()));
    };

    match source_for_path(&path) {
        Ok(source) => {
            log::info!("Corpus: {}", path.display());
            source
        }
        Err(err) => {
            log::warn!("{err}; continuing with an empty corpus");
            Box::new(InMemory::new(Vec::new()))
        }
    }
}

fn load_vocabulary(config: &BiblioConfig, flag: Option<&Path>) -> Result<Vocabulary> {
    match flag.or(config.vocabulary.as_deref()) {
        Some(path) => Vocabulary::from_path(path)
            .with_context(|| format!("Failed to load vocabulary {}", path.display())),
        None => Ok(Vocabulary::builtin()),
    }
}

/// Map a subcommand onto the command API; the flag says whether a
/// successful string result is printed as raw text
fn request_for(command: Commands) -> Result<(CommandRequest, bool)> {
    let (action, payload, raw_text): (CommandAction, Value, bool) = match command {
        Commands::Frequency => (CommandAction::Frequency, json!({}), false),
        Commands::WordCloud(args) => (CommandAction::WordCloud, json!({ "top": args.top }), false),
        Commands::Pairs(args) => (
            CommandAction::Pairs,
            json!({
                "field_a": args.field_a,
                "field_b": args.field_b,
                "limit": args.limit,
            }),
            false,
        ),
        Commands::Venues(args) => (CommandAction::Venues, json!({ "limit": args.limit }), false),
        Commands::Graph(args) => (
            CommandAction::Graph,
            json!({
                "venue_limit": args.venues,
                "sample_size": args.sample,
                "seed": args.seed,
                "attribute_field": args.attribute_field,
                "per_venue_titles": args.per_venue_titles,
                "format": args.format.as_str(),
            }),
            matches!(args.format, OutputFormat::Dot),
        ),
        Commands::Corpus { query } => match query {
            CorpusQuery::Count => (CommandAction::CorpusStats, json!({}), false),
            CorpusQuery::Unique { field } => {
                (CommandAction::UniqueValues, json!({ "field": field }), false)
            }
            CorpusQuery::Get { id } => (CommandAction::GetRecord, json!({ "id": id }), false),
            CorpusQuery::Filter { field, value } => (
                CommandAction::Filter,
                json!({ "field": field, "value": value }),
                false,
            ),
        },
        Commands::Command(args) => {
            let raw = read_request(&args)?;
            let request: CommandRequest =
                serde_json::from_str(&raw).context("Invalid JSON passed to --json/--file")?;
            return Ok((request, false));
        }
    };
    Ok((CommandRequest { action, payload }, raw_text))
}

fn print_response(response: &CommandResponse, pretty: bool, raw_text: bool) -> Result<()> {
    if raw_text && !response.is_error() {
        if let Value::String(text) = &response.data {
            println!("{text}");
            return Ok(());
        }
    }

    let output = if pretty {
        serde_json::to_string_pretty(response)?
    } else {
        serde_json::to_string(response)?
    };
    println!("{output}");
    Ok(())
}

fn read_request(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}
