use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wikilex::{ExtractConfig, JsonLinesSink};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "wikilex")]
#[command(about = "Extract lexical relations from Wiktionary dumps")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract relation entries into JSON lines
    Extract(ExtractArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Path to the Wiktionary dump file (.xml or .xml.bz2)
    #[arg(short, long)]
    input: String,

    /// Output file for JSON lines
    #[arg(short, long)]
    output: String,

    /// Namespace whose pages are classified (repeatable)
    #[arg(long = "target", default_value = wikilex::config::DEFAULT_TARGET_NAMESPACE)]
    targets: Vec<String>,

    /// Language considered by section capture (repeatable)
    #[arg(long = "language", default_values = ["English", "Translingual"])]
    languages: Vec<String>,

    /// Emit redirect records
    #[arg(long)]
    redirects: bool,

    /// Capture translation sections
    #[arg(long)]
    translations: bool,

    /// Capture pronunciation sections
    #[arg(long)]
    pronunciations: bool,

    /// Capture linkage sections (derived, related, coordinate terms, ...)
    #[arg(long)]
    linkages: bool,

    /// Capture compound sections
    #[arg(long)]
    compounds: bool,

    /// Stop after this many entries (for testing)
    #[arg(long)]
    limit: Option<u64>,

    /// Show a progress spinner
    #[arg(long)]
    progress: bool,
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let config = ExtractConfig::new()
        .with_target_namespaces(args.targets)
        .with_languages(args.languages)
        .with_redirects(args.redirects)
        .with_translations(args.translations)
        .with_pronunciations(args.pronunciations)
        .with_linkages(args.linkages)
        .with_compounds(args.compounds)
        .with_limit(args.limit)
        .with_progress(args.progress);

    let mut sink = JsonLinesSink::create(&args.output)
        .with_context(|| format!("Failed to create output file: {}", args.output))?;

    info!("Starting extraction");
    let start = Instant::now();
    let stats = wikilex::run_path(&args.input, &config, &mut sink)
        .with_context(|| format!("Extraction failed for: {}", args.input))?;
    let duration = start.elapsed();
    info!(duration_secs = duration.as_secs_f64(), "Extraction complete");

    println!();
    println!("=== Summary ===");
    println!("Extraction time:    {:.2}s", duration.as_secs_f64());
    println!();
    println!("Pages seen:         {}", stats.pages());
    println!("Entries written:    {}", stats.entries());
    println!("Relations found:    {}", stats.relations());
    println!("Redirects written:  {}", stats.redirects());
    println!("Redirects skipped:  {}", stats.redirects_skipped());
    println!("Sections captured:  {}", stats.sections());
    println!("Non-text pages:     {}", stats.non_text());
    println!("Pages skipped:      {}", stats.skipped());
    println!("Unsupported tags:   {}", stats.unsupported_tags());
    println!("Unknown values:     {}", stats.unrecognized_values());

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Extract(args) => run_extract(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
