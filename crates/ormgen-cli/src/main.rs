//! ormgen CLI tool.

use std::path::Path;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ormgen_codegen::{CodeGenerator, EntityGenerator, ViewRegistryBuilder};
use ormgen_model::Kind;
use ormgen_schema::{dialect, DocumentKind, DocumentRef, Project};

#[derive(Parser)]
#[command(name = "ormgen")]
#[command(author, version, about = "Generates Java entity classes from database schema documents", long_about = None)]
struct Cli {
    /// Log generation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate entity classes from a project file
    Generate {
        /// Input project file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Set generator options (key=value): package, dialect, accessors
        #[arg(long = "set", value_parser = parse_key_value)]
        options: Vec<(String, String)>,
    },

    /// Validate a project file and list the tables it would generate
    Check {
        /// Input project file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List model kinds and their default views
    Kinds,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid option format: '{}', expected key=value", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            options,
        } => run_generate(&input, &output, options),
        Commands::Check { input } => run_check(&input),
        Commands::Kinds => run_kinds(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_generate(
    input: &Path,
    output: &Path,
    options: Vec<(String, String)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::load(input)?;

    let mut generator = EntityGenerator::java()?;
    for (key, value) in &options {
        generator.set_option(key, value)?;
    }

    let files = generator.generate(&project)?;
    tracing::debug!(generator = generator.name(), files = files.len(), "generation finished");

    std::fs::create_dir_all(output)?;
    files.write_to(output)?;

    println!("Generated {} files to {}", files.len(), output.display());
    for file in &files.files {
        println!("  - {}", file.path.display());
    }

    Ok(())
}

fn run_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::load(input)?;
    let tables = project.enabled_tables();

    println!("✓ {} is valid", input.display());
    println!("  project {} ({} tables enabled)", project.name, tables.len());

    for path in &tables {
        let type_name = match path.ancestor(DocumentKind::Dbms) {
            Some(DocumentRef::Dbms(dbms)) => dbms.type_name.as_str(),
            _ => continue,
        };
        let naming = dialect(type_name)?;
        let full_name = naming.full_name_of_table(path)?;
        let excluded = path
            .ancestor(DocumentKind::Schema)
            .is_some_and(|schema| naming.is_excluded(schema.name()));

        let columns = match path.document() {
            DocumentRef::Table(table) => table.columns.iter().filter(|c| c.enabled).count(),
            _ => 0,
        };
        if excluded {
            println!("    table {} (system schema, skipped)", full_name);
        } else {
            println!("    table {} ({} columns)", full_name, columns);
        }
    }

    Ok(())
}

fn run_kinds() -> Result<(), Box<dyn std::error::Error>> {
    let builder = ViewRegistryBuilder::java();

    println!("Model kinds:");
    println!();

    for kind in Kind::ALL {
        let coverage = if builder.is_installed(kind) {
            "(java view)"
        } else {
            "(no view)"
        };
        println!("  {} {}", kind, coverage);
    }

    // Fails if a kind was added without a default view.
    builder.build()?;
    Ok(())
}
