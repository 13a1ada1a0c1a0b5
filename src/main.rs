use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scholar_cites::config::{find_config_file, load_config, load_env_config, Config};
use scholar_cites::models::{CitationRecord, SearchQuery};
use scholar_cites::sources::{FilePageSource, HttpPageSource, PageSource};
use scholar_cites::ScholarClient;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// scholar-cites - Extract citation records from Google Scholar result pages
#[derive(Parser, Debug)]
#[command(name = "scholar-cites")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract citation records from Google Scholar result pages", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// One title per line
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search Google Scholar and extract the first results page
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Interface language (hl), e.g. "en" or "es"
        #[arg(long, short)]
        lang: Option<String>,

        /// Only results published in or after this year
        #[arg(long)]
        year_from: Option<u32>,

        /// Only results published in or before this year
        #[arg(long)]
        year_to: Option<u32>,

        /// Skip results that cannot be extracted instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Extract a results page from a URL
    #[command(alias = "f")]
    Fetch {
        /// Results page URL
        url: String,

        /// Skip results that cannot be extracted instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Extract a saved results page
    #[command(alias = "p")]
    Parse {
        /// HTML file
        file: PathBuf,

        /// Skip results that cannot be extracted instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn resolve_config(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let path = cli.config.clone().or_else(find_config_file);

    let mut config = match &path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => load_env_config().context("Failed to read configuration from environment")?,
    };

    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    Ok((config, path))
}

fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("scholar_cites={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn collect_records<S: PageSource>(
    client: &ScholarClient<S>,
    location: &str,
    lenient: bool,
    quiet: bool,
) -> Result<Vec<CitationRecord>> {
    if !lenient {
        return client
            .fetch_records(location)
            .await
            .with_context(|| format!("Failed to extract results from {}", location));
    }

    let outcome = client
        .fetch_records_lossy(location)
        .await
        .with_context(|| format!("Failed to load {}", location))?;

    if !quiet {
        for failure in &outcome.failures {
            eprintln!("Skipped result {}: {}", failure.index + 1, failure.error);
        }
    }

    Ok(outcome.records)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = resolve_config(&cli)?;
    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Search {
            ref query,
            ref lang,
            year_from,
            year_to,
            lenient,
        }) => {
            let mut search_query = SearchQuery::new(query);
            search_query.language = lang.clone();
            search_query.year_from = year_from;
            search_query.year_to = year_to;

            let source = HttpPageSource::from_config(&config.http)?;
            let client = ScholarClient::new(source, config.scholar.clone())?;
            let url = client.query_url(&search_query);

            let records = collect_records(&client, &url, lenient, cli.quiet).await?;
            output_records(&records, cli.output)?;
        }

        Some(Commands::Fetch { ref url, lenient }) => {
            let source = HttpPageSource::from_config(&config.http)?;
            let client = ScholarClient::new(source, config.scholar.clone())?;

            let records = collect_records(&client, url, lenient, cli.quiet).await?;
            output_records(&records, cli.output)?;
        }

        Some(Commands::Parse { ref file, lenient }) => {
            let client = ScholarClient::new(FilePageSource::new(), config.scholar.clone())?;

            let records =
                collect_records(&client, &file.to_string_lossy(), lenient, cli.quiet).await?;
            output_records(&records, cli.output)?;
        }

        Some(Commands::Config) => {
            print!("{}", config.to_toml().context("Failed to render configuration")?);
        }

        None => {
            // Reference behaviour: fetch the default query and list titles
            let source = HttpPageSource::from_config(&config.http)?;
            let client = ScholarClient::new(source, config.scholar.clone())?;
            let url = config.scholar.default_query_url.clone();

            let titles = client
                .titles(&url)
                .await
                .with_context(|| format!("Failed to load {}", url))?;
            for title in titles {
                println!("{}", title);
            }
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn output_records(records: &[CitationRecord], format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Plain => {
            for record in records {
                println!("{}", record.title);
            }
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Title", "Year", "Cited by", "ID"]);

            for record in records {
                table.add_row(vec![
                    Cell::new(truncate(&record.title, 60)).add_attribute(Attribute::Bold),
                    Cell::new(record.year),
                    Cell::new(record.citations),
                    Cell::new(record.id_or_empty()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
