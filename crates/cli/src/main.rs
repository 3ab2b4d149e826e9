mod echo;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use kereta_core::{
    FetchConfig, JsonConfig, KeretaError, ResultSet, SchemaLoader, SearchConfig, SearchQuery, SearchRequest, TextConfig,
    convert_to_json, convert_to_text, extract_html, fetch_url, search_url,
};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for rejected station codes or dates; clap keeps 2 for usage errors
const EXIT_BAD_INPUT: u8 = 4;
/// Exit code when the page lists no trains
const EXIT_NO_RESULTS: u8 = 3;

/// Output format for extracted trains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Search train schedules on the booking site and print them as JSON
#[derive(Parser, Debug)]
#[command(name = "kereta")]
#[command(version)]
#[command(about = "Search train schedules and extract them as JSON", long_about = None)]
struct Args {
    /// Origin station code (e.g. PSE)
    #[arg(value_name = "FROM", required_unless_present = "input")]
    from: Option<String>,

    /// Destination station code (e.g. YK)
    #[arg(value_name = "TO", required_unless_present = "input")]
    to: Option<String>,

    /// Departure date as YYYY-MM-DD
    #[arg(value_name = "DATE", required_unless_present = "input")]
    date: Option<String>,

    /// Extract from a saved results page (file path or "-" for stdin) instead of fetching
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include the search query alongside the trains
    #[arg(long)]
    include_query: bool,

    /// Print the search URL and exit without fetching
    #[arg(long)]
    print_url: bool,

    /// Extraction schema file (default: ~/.config/kereta/schema.txt if present)
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Base URL of the booking search page
    #[arg(long, default_value = kereta_core::DEFAULT_BASE_URL, value_name = "URL")]
    base_url: String,

    /// Host the fetcher may contact; repeat for several (default: booking.kai.id)
    #[arg(long = "allow-domain", value_name = "HOST")]
    allow_domains: Vec<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Validates the station codes and date if all three were given.
    fn request(&self) -> kereta_core::Result<Option<SearchRequest>> {
        match (&self.from, &self.to, &self.date) {
            (Some(from), Some(to), Some(date)) => SearchRequest::validate(from, to, date).map(Some),
            _ => Ok(None),
        }
    }

    fn search_config(&self) -> SearchConfig {
        let defaults = FetchConfig::default();
        let allowed_domains = if self.allow_domains.is_empty() {
            defaults.allowed_domains
        } else {
            self.allow_domains.clone()
        };

        SearchConfig {
            base_url: self.base_url.clone(),
            fetch: FetchConfig {
                timeout: self.timeout,
                user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
                allowed_domains,
            },
            ..Default::default()
        }
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        kereta_core::fetch_stdin().context("Failed to read from stdin")
    } else {
        kereta_core::fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

fn render(args: &Args, trains: &ResultSet, query: Option<&SearchQuery>) -> anyhow::Result<String> {
    match args.format {
        OutputFormat::Json => {
            let config = JsonConfig { include_query: args.include_query, pretty: args.pretty };
            convert_to_json(trains, query, &config).context("Failed to convert to JSON")
        }
        OutputFormat::Text => {
            let config = TextConfig { include_header: args.include_query, numbered: true };
            Ok(convert_to_text(trains, query, &config))
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let request = args.request()?;
    let config = args.search_config();

    let query_and_url = match &request {
        Some(request) => Some(search_url(request, &config)?),
        None => None,
    };

    if args.print_url {
        let (_, url) = query_and_url.as_ref().context("--print-url needs FROM, TO and DATE")?;
        println!("{}", url);
        return Ok(());
    }

    let html = match (&args.input, &query_and_url) {
        (Some(input), _) => {
            if args.verbose {
                echo::print_step(1, 3, &format!("Reading {}", input.bright_white()));
            }
            read_input(input)?
        }
        (None, Some((_, url))) => {
            if args.verbose {
                echo::print_step(1, 3, &format!("Fetching {}", url.as_str().bright_white().underline()));
            }
            fetch_url(url, &config.fetch).await.context("Failed to fetch schedule page")?
        }
        (None, None) => anyhow::bail!("FROM, TO and DATE are required unless --input is given"),
    };

    if args.verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
        eprintln!();
        echo::print_step(2, 3, "Extracting trains");
    }

    let mut loader = SchemaLoader::with_user_config();
    if let Some(path) = &args.schema {
        loader = loader.file(path);
    }
    let schema = loader
        .load()
        .context("Failed to load extraction schema")?
        .compile()
        .context("Invalid extraction schema")?;

    let trains = extract_html(&html, &schema)?;
    tracing::debug!(trains = trains.len(), "extraction finished");

    if args.verbose {
        echo::print_detail("Trains", &trains.len().to_string());
        eprintln!();
    }

    let trains = trains.non_empty()?;
    let output = render(&args, &trains, query_and_url.as_ref().map(|(q, _)| q))?;

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        echo::print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    echo::init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<KeretaError>() {
            Some(KeretaError::NoResults) => {
                echo::print_warning("No trains found for this route and date");
                ExitCode::from(EXIT_NO_RESULTS)
            }
            Some(e) if e.is_bad_input() => {
                echo::print_error(&format!("{:#}", err));
                ExitCode::from(EXIT_BAD_INPUT)
            }
            _ => {
                echo::print_error(&format!("{:#}", err));
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domains_default() {
        let args = Args::parse_from(["kereta", "--base-url", "https://mirror.example/", "PSE", "YK", "2022-09-20"]);
        let config = args.search_config();

        assert_eq!(config.base_url, "https://mirror.example/");
        assert_eq!(config.fetch.allowed_domains, ["booking.kai.id"]);
    }

    #[test]
    fn test_allow_domain_flag() {
        let args = Args::parse_from([
            "kereta",
            "--allow-domain",
            "mirror.example",
            "--allow-domain",
            "booking.kai.id",
            "PSE",
            "YK",
            "2022-09-20",
        ]);

        assert_eq!(args.search_config().fetch.allowed_domains, ["mirror.example", "booking.kai.id"]);
    }
}
