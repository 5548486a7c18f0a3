use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use tinychefs_shopping::sources::list_sources;
use tinychefs_shopping::{extract_records, AggregatedTable, AppConfig, ShoppingSession};

#[derive(Parser, Debug)]
#[command(
    name = "tinychefs-shopping",
    version,
    about = "Combine recipe exports into one scaled shopping checklist"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the recipe documents available for selection
    List(ListArgs),
    /// Show the ingredient lines parsed from documents, without aggregating
    Scan(ScanArgs),
    /// Aggregate documents into a shopping list and optionally write a checklist
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Directory to scan (defaults to the configured source directory)
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScanArgs {
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Recipe documents, processed in the given order
    files: Vec<PathBuf>,

    /// Target serving size (defaults to the configured one)
    #[arg(long)]
    servings: Option<u32>,

    /// Checklist title
    #[arg(long, default_value = "")]
    title: String,

    /// Write the checklist here: a PDF when the path ends in `.pdf`, Latin-1 text otherwise
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the aggregated table as JSON here
    #[arg(long)]
    table_json: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::List(args) => {
            let dir = args.dir.unwrap_or_else(|| PathBuf::from(&config.source_dir));
            for path in list_sources(&dir)? {
                println!("{}", path.display());
            }
        }
        Commands::Scan(args) => {
            for record in extract_records(&args.files, &config)? {
                println!(
                    "{}\t{}\t{}",
                    record.category,
                    record.name,
                    format!("{} {}", record.quantity_text, record.unit_text).trim()
                );
            }
        }
        Commands::Generate(args) => {
            let servings = args.servings.unwrap_or(config.servings);
            let mut session = ShoppingSession::new(config)?;

            let table = session.generate(&args.files, servings)?;
            print_table(table);

            if let Some(path) = &args.table_json {
                fs::write(path, table.to_json()?)?;
                info!("Wrote table to {}", path.display());
            }

            if let Some(path) = &args.output {
                write_checklist(&session, &args.title, path)?;
            }
        }
    }

    Ok(())
}

fn print_table(table: &AggregatedTable) {
    println!("Combined ingredient list for {} servings", table.servings);
    for row in &table.rows {
        println!("{}\t{}\t{}", row.category, row.ingredient, row.quantity_display);
    }
}

fn write_checklist(
    session: &ShoppingSession,
    title: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = session.render(title)?;
    document.write_to(path)?;
    info!(
        "Wrote {}-page checklist to {}",
        document.page_count(),
        path.display()
    );
    Ok(())
}
