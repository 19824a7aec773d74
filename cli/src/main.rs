//! bardtext CLI - flatten Bard documents into indexable text

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use bardtext::schema::BlueprintRegistry;
use bardtext::{
    clean_text, ExtractionPath, FallbackReason, NoSchema, SchemaLookup, TransformOptions, Value,
};

#[derive(Parser)]
#[command(name = "bardtext")]
#[command(author = "fitzage")]
#[command(version)]
#[command(about = "Flatten Bard documents into clean, indexable text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a JSON Bard document
    Extract {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Blueprint registry JSON file
        #[arg(long, value_name = "FILE", env = "BARDTEXT_BLUEPRINTS")]
        blueprints: Option<PathBuf>,

        /// Blueprint path of the document's content type
        #[arg(long, default_value = "default")]
        blueprint: String,

        /// Field handle holding the document
        #[arg(long, default_value = "content")]
        field: String,

        /// Additional set type to include (repeatable)
        #[arg(long = "set-type", value_name = "TYPE")]
        set_types: Vec<String>,

        /// Maximum set nesting depth
        #[arg(long, default_value_t = bardtext::extract::DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Maximum output length in characters
        #[arg(long, default_value_t = bardtext::extract::DEFAULT_MAX_LENGTH)]
        max_length: usize,

        /// Extract top-level nodes in parallel
        #[arg(long)]
        parallel: bool,

        /// Report which extraction path was taken (on stderr)
        #[arg(long)]
        report: bool,
    },

    /// Run the cleanup pipeline over plain text
    Clean {
        /// Input text file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the blueprints in a registry file
    Blueprints {
        /// Blueprint registry JSON file
        #[arg(value_name = "FILE")]
        registry: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            blueprints,
            blueprint,
            field,
            set_types,
            max_depth,
            max_length,
            parallel,
            report,
        } => {
            let options = TransformOptions::new()
                .with_max_depth(max_depth)
                .with_max_length(max_length)
                .with_parallel(parallel);
            cmd_extract(ExtractArgs {
                input: &input,
                output: output.as_deref(),
                blueprints: blueprints.as_deref(),
                blueprint: &blueprint,
                field: &field,
                set_types: &set_types,
                options,
                report,
            })
        }
        Commands::Clean { input } => cmd_clean(&input),
        Commands::Blueprints { registry } => cmd_blueprints(&registry),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct ExtractArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    blueprints: Option<&'a Path>,
    blueprint: &'a str,
    field: &'a str,
    set_types: &'a [String],
    options: TransformOptions,
    report: bool,
}

fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

fn write_output(output: Option<&Path>, text: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, text)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_extract(args: ExtractArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let document = Value::from_json_str(&read_input(args.input)?)?;

    let registry = args.blueprints.map(BlueprintRegistry::from_path).transpose()?;
    if let Some(registry) = &registry {
        log::debug!("Loaded {} blueprint(s)", registry.len());
    }
    let schema: &dyn SchemaLookup = match registry.as_ref() {
        Some(registry) => registry,
        None => &NoSchema,
    };

    let set_types: Vec<&str> = args.set_types.iter().map(String::as_str).collect();
    let result = bardtext::transform_detailed(
        &document,
        schema,
        args.blueprint,
        args.field,
        &set_types,
        &args.options,
    );

    if args.report {
        let path = match &result.path {
            ExtractionPath::Empty => "empty input".dimmed().to_string(),
            ExtractionPath::Schema => "schema".green().to_string(),
            ExtractionPath::Fallback(FallbackReason::SchemaUnavailable) => {
                "fallback (field not in blueprint)".yellow().to_string()
            }
            ExtractionPath::Fallback(FallbackReason::ExtractionFailure(reason)) => {
                format!("{} ({})", "fallback".yellow(), reason)
            }
        };
        eprintln!("{}: {}", "Path".bold(), path);
        eprintln!("{}: {}", "Characters".bold(), result.text.chars().count());
    }

    write_output(args.output, &result.text)?;
    Ok(())
}

fn cmd_clean(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    write_output(None, &clean_text(&text))?;
    Ok(())
}

fn cmd_blueprints(registry: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = BlueprintRegistry::from_path(registry)?;

    println!("{}", "Blueprints".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for path in registry.paths() {
        println!("{}", path.bold());
        if let Some(blueprint) = registry.find(path)? {
            for field in &blueprint.fields {
                println!("  {} {} ({})", "├─".dimmed(), field.handle, field.field_type);
            }
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "bardtext".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bard document flattening tool");
    println!();
    println!("Repository: {}", "https://github.com/fitzage/bardtext".dimmed());
    println!("License: MIT");
}
