use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use swiftdoc::config::{self, OutputFormat};
use swiftdoc::generate::{self, GenerateOptions, Outcome};
use swiftdoc::output;
use swiftdoc::render::SiteRenderer;
use swiftdoc::scan::{self, ManifestExtractor};
use swiftdoc::types::AccessLevel;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swiftdoc")]
#[command(about = "Documentation generator for Swift modules")]
#[command(long_about = "\
Documentation generator for Swift modules

Reads the symbols of a module from a JSON symbol manifest and writes one page
per type, typealias, operator, global name and extended external type.

Output layouts:

  commonmark (default)             html
  docs/                            docs/
  ├── Home.md                      ├── index.html
  ├── _Sidebar.md                  ├── all.css
  ├── _Footer.md                   └── Models/
  └── Models/                          └── User/
      └── User.md                          └── index.html

Pages mirror the directory of the source file that declared them, relative to
the input directory containing it. A module with a single page is written as
Home.md (or index.html) with no sidebar or footer.

Settings are read from swiftdoc.toml in the working directory; command-line
flags override it. Run 'swiftdoc gen-config' for a documented config file.")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by commands that classify a module.
#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Directories containing the module's Swift sources
    inputs: Vec<PathBuf>,

    /// JSON symbol manifest written by the interface extractor
    #[arg(long, default_value = "symbols.json")]
    symbols: PathBuf,

    /// Module name used in page titles
    #[arg(long)]
    module_name: Option<String>,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Base URL that links are composed against
    #[arg(long)]
    base_url: Option<String>,

    /// Lowest access level to document (private, fileprivate, internal, public, open)
    #[arg(long)]
    minimum_access_level: Option<AccessLevel>,
}

#[derive(Subcommand)]
enum Command {
    /// Write documentation pages for a module
    Generate(RunArgs),
    /// Classify a module and print the planned pages without writing
    Check(RunArgs),
    /// Print a stock swiftdoc.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => {
            let (options, scan) = prepare(&args)?;
            match generate::generate(&scan, &options, &SiteRenderer)? {
                Outcome::Ready(run) => output::print_generate_output(&run, &options.output),
                Outcome::Empty(hint) => tracing::warn!("{}", output::format_empty_hint(hint)),
            }
        }
        Command::Check(args) => {
            let (options, scan) = prepare(&args)?;
            output::print_scan_output(&scan);
            println!();
            match generate::plan(&scan, &options)? {
                Outcome::Ready(run) => output::print_check_output(&run, &options.output),
                Outcome::Empty(hint) => tracing::warn!("{}", output::format_empty_hint(hint)),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `-v` raises the default `warn` level; an explicit RUST_LOG wins.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve config, size the worker pool and scan the inputs.
fn prepare(
    args: &RunArgs,
) -> Result<(GenerateOptions, scan::ScanResult), Box<dyn std::error::Error>> {
    let config = config::load_config(Path::new("."), cli_overrides(args))?;
    init_thread_pool(&config.processing);

    let extractor = ManifestExtractor::from_path(&args.symbols)?;
    let scan = scan::scan(&args.inputs, config.module_name.as_deref(), &extractor)?;
    Ok((GenerateOptions::from_config(&config), scan))
}

/// Sparse config table holding only the flags that were given.
fn cli_overrides(args: &RunArgs) -> toml::Value {
    let mut root = toml::Table::new();
    if let Some(name) = &args.module_name {
        root.insert("module_name".into(), name.clone().into());
    }
    if let Some(output) = &args.output {
        root.insert("output".into(), output.display().to_string().into());
    }

    let mut format = toml::Table::new();
    if let Some(kind) = args.format {
        let kind = match kind {
            OutputFormat::Commonmark => "commonmark",
            OutputFormat::Html => "html",
        };
        format.insert("kind".into(), kind.into());
    }
    if let Some(base_url) = &args.base_url {
        format.insert("base_url".into(), base_url.clone().into());
    }
    if !format.is_empty() {
        root.insert("format".into(), toml::Value::Table(format));
    }

    if let Some(level) = args.minimum_access_level {
        let mut access = toml::Table::new();
        access.insert("minimum".into(), level.as_str().into());
        root.insert("access".into(), toml::Value::Table(access));
    }

    toml::Value::Table(root)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
