use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

// Import from acrolex-core
use acrolex_core::{BatchSummary, DocumentProcessor, ExtractionConfig, ProcessingMode};

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Lowercase words plus standalone acronyms
    Vocabulary,
    /// Acronym -> long form mappings plus standalone acronyms
    Definitions,
}

impl From<Mode> for ProcessingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Vocabulary => ProcessingMode::Vocabulary,
            Mode::Definitions => ProcessingMode::Definitions,
        }
    }
}

#[derive(Parser)]
#[command(name = "acrolex")]
#[command(about = "Build a domain vocabulary and acronym glossary from a folder of PDFs")]
struct Args {
    /// Folder scanned (non-recursively) for PDF files
    #[arg(short, long, default_value = "input")]
    input: PathBuf,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Extraction mode; overrides the config file
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Output directory for CSV tables and the processing log
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Stopword list, one word per line (default: built-in English list)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Keep source PDFs after processing instead of deleting them
    #[arg(long)]
    keep_sources: bool,

    /// Enable detailed profiling of each per-document step
    #[arg(long)]
    profile: bool,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("🦀 Acrolex Vocabulary Extractor");

    if args.show_configs {
        show_help();
        return Ok(());
    }

    if !args.input.is_dir() {
        println!("⚠️  Input folder not found at: {}", args.input.display());
        println!("   Please check the folder path.");
        return Ok(());
    }

    let mut config = ExtractionConfig::load_with_fallback(args.config.as_deref());

    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    // Apply CLI overrides to config
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output.directory = output_dir.clone();
    }
    if let Some(stopwords) = &args.stopwords {
        config.stopwords_path = Some(stopwords.clone());
    }
    if args.keep_sources {
        config.output.delete_processed_sources = false;
    }

    println!("🔧 Mode: {}", config.mode);
    println!("📁 Input folder: {}", args.input.display());
    println!("📁 Output folder: {}", config.output.directory.display());
    if !config.output.delete_processed_sources {
        println!("🔒 Source PDFs will be kept");
    }

    let mut processor = DocumentProcessor::new_cli(config)?.with_profiling(args.profile);

    match processor.run_batch(&args.input) {
        Ok(summary) => {
            print_summary(&summary, processor.mode());

            if let Some(path) = &args.summary_json {
                save_summary(&summary, processor.mode(), &args.input, path)?;
            }
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_summary(summary: &BatchSummary, mode: ProcessingMode) {
    println!("\n{}", "=".repeat(60));
    println!("✅ PROCESSING COMPLETE");
    println!("{}", "=".repeat(60));
    println!(
        "📄 Documents processed: {}/{}",
        summary.processed, summary.documents_found
    );
    if summary.skipped > 0 {
        println!("⚠️  Skipped: {}", summary.skipped);
    }
    if summary.failed > 0 {
        println!("❌ Failed: {}", summary.failed);
    }

    println!("📊 Results:");
    match mode {
        ProcessingMode::Vocabulary => {
            println!("   - Unique lowercase words: {}", summary.unique_lowercase_words);
        }
        ProcessingMode::Definitions => {
            println!("   - Acronym mappings: {}", summary.unique_acronym_mappings);
        }
    }
    println!(
        "   - Standalone acronyms: {}",
        summary.unique_standalone_acronyms
    );

    if !summary.output_files.is_empty() {
        println!("\n💾 Output files:");
        for (index, file) in summary.output_files.iter().enumerate() {
            println!("   {}. {}", index + 1, file.display());
        }
    }
    println!("{}", "=".repeat(60));
}

fn save_summary(
    summary: &BatchSummary,
    mode: ProcessingMode,
    input: &Path,
    output_path: &Path,
) -> Result<()> {
    let json = serde_json::json!({
        "input_folder": input.display().to_string(),
        "mode": mode,
        "completed_at": chrono::Utc::now().to_rfc3339(),
        "summary": summary,
    });
    std::fs::write(output_path, serde_json::to_string_pretty(&json)?)?;
    println!("💾 Run summary saved to: {}", output_path.display());
    Ok(())
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --input <dir>           Folder of PDFs to process (default: ./input)");
    println!("  --config <path>         Load custom config file");
    println!("  --mode <mode>           vocabulary or definitions");
    println!("  --output-dir <dir>      Where CSV tables and the processing log go");
    println!("  --stopwords <path>      Custom stopword list, one word per line");
    println!("  --keep-sources          Do not delete PDFs after processing");
    println!("  --profile               Time each per-document step");
    println!("  --summary-json <path>   Write a JSON run summary");
    println!("\n📄 Modes:");
    println!("  vocabulary   - lowercase_words_alphabetical.csv, standalone_acronyms_alphabetical.csv");
    println!("  definitions  - acronym_mappings.csv, standalone_acronyms.csv");
    println!("\n📝 Example config (YAML):");
    println!("  mode: definitions");
    println!("  output:");
    println!("    directory: glossary_output");
    println!("  cleanup:");
    println!("    max_attempts: 3");
    println!("    delay_ms: 500");
    println!("\n📝 Usage Examples:");
    println!("  cargo run -- -i scans/");
    println!("  cargo run -- -i scans/ -m definitions -o glossary/");
    println!("  cargo run -- -i scans/ -c acrolex.yaml --keep-sources --profile");
}
