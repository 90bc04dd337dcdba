use std::path::{Path, PathBuf};

use argspec_core::{ParseOutcome, Parser, ParserDefinition, validate_definition};
use clap::{Args, Parser as ClapParser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for parse results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, ClapParser)]
#[command(name = "argspec")]
#[command(about = "Parse command-line tokens against a declarative option definition")]
struct Cli {
    /// Log engine decisions to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens given after `--` and print the resulting values.
    Parse(ParseArgs),
    /// Print the usage text for a definition file.
    Usage(UsageArgs),
    /// Validate one or more definition files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Definition file (YAML for .yaml/.yml, JSON otherwise).
    #[arg(long)]
    spec: PathBuf,
    /// Program name shown in usage text, overriding the definition.
    #[arg(long)]
    program: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to parse.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Definition file (YAML for .yaml/.yml, JSON otherwise).
    #[arg(long)]
    spec: PathBuf,
    /// Program name shown in usage text, overriding the definition.
    #[arg(long)]
    program: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Definition files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let parser = load_parser(&args.spec, args.program)?;
    debug!(tokens = args.tokens.len(), spec = %args.spec.display(), "Parsing tokens");

    match parser.parse(args.tokens.as_slice()).map_err(|e| e.to_string())? {
        ParseOutcome::Help(text) => print!("{text}"),
        ParseOutcome::Parsed(values) => {
            let rendered = match args.format {
                CliOutputFormat::Json => serde_json::to_string_pretty(&values)
                    .map_err(|e| format!("JSON serialization failed: {e}"))?,
                CliOutputFormat::Yaml => serde_yaml::to_string(&values)
                    .map_err(|e| format!("YAML serialization failed: {e}"))?,
            };
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let parser = load_parser(&args.spec, args.program)?;
    print!("{}", parser.usage());
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut options = 0usize;
    let mut problems = 0usize;
    for path in &args.inputs {
        let definition = load_definition(path)?;
        let errors = validate_definition(&definition);
        for err in &errors {
            eprintln!("'{}': {err}", path.display());
        }
        problems += errors.len();
        options += definition.options.len();
    }
    if problems > 0 {
        return Err(format!("{problems} validation problem(s) found"));
    }
    println!(
        "Validated {} definition file(s) declaring {options} option(s).",
        args.inputs.len()
    );
    Ok(())
}

fn load_definition(path: &Path) -> Result<ParserDefinition, String> {
    ParserDefinition::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn load_parser(path: &Path, program: Option<String>) -> Result<Parser, String> {
    let mut definition = load_definition(path)?;
    if let Some(program) = program {
        definition.program = program;
    }
    definition
        .into_parser()
        .map_err(|err| format!("'{}': {err}", path.display()))
}
