//! CLI entry point for the data cleaning pipeline.

use std::path::Path;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use datadash_cleaning::io::{CsvQuoting, LoadedDataset, load_dataset, write_csv};
use datadash_cleaning::{
    AdvisorySuggestion, CleaningError, CleaningOptions, CleaningResult, DataInsights,
    MissingValueStrategy, Pipeline, QualityDenominator,
};
use dotenv::dotenv;
use serde_json::json;
use tracing::{error, info, warn};

#[cfg(feature = "ai")]
use datadash_cleaning::ai::GeminiProvider;
#[cfg(feature = "ai")]
use std::env;
#[cfg(feature = "ai")]
use std::sync::Arc;

/// CLI-compatible missing value strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMissingStrategy {
    /// Drop rows with a missing value in any selected column
    Remove,
    /// Impute from a sample of the column
    Fill,
    /// Leave missing values as they are
    Keep,
}

impl From<CliMissingStrategy> for MissingValueStrategy {
    fn from(cli: CliMissingStrategy) -> Self {
        match cli {
            CliMissingStrategy::Remove => MissingValueStrategy::Remove,
            CliMissingStrategy::Fill => MissingValueStrategy::Fill,
            CliMissingStrategy::Keep => MissingValueStrategy::Keep,
        }
    }
}

/// CLI-compatible quality score denominator
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliQualityDenominator {
    /// Rows times the number of report fields (5)
    ReportFields,
    /// Rows times the number of columns
    Columns,
}

impl From<CliQualityDenominator> for QualityDenominator {
    fn from(cli: CliQualityDenominator) -> Self {
        match cli {
            CliQualityDenominator::ReportFields => QualityDenominator::ReportFields,
            CliQualityDenominator::Columns => QualityDenominator::Columns,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Rule-based data cleaning for uploaded datasets",
    long_about = "Cleans a CSV, JSON or Excel dataset: deduplication, missing values, \
                  standardization and type validation, followed by a quality score.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  GEMINI_API_KEY    API key for Gemini (used by --suggest and --insights)\n\n\
                  EXAMPLES:\n  \
                  # Clean every column and print a summary\n  \
                  datadash-clean -i customers.csv\n\n  \
                  # Impute instead of dropping, write the cleaned CSV\n  \
                  datadash-clean -i customers.csv --missing fill -o cleaned.csv\n\n  \
                  # Only look at two columns, machine-readable output\n  \
                  datadash-clean -i records.json -c name,email --json"
)]
struct Args {
    /// Path to the CSV, JSON or Excel file to clean
    #[arg(short, long)]
    input: String,

    /// Comma-separated columns to clean (default: all columns)
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Strategy for rows with missing values
    #[arg(long, value_enum, default_value = "remove")]
    missing: CliMissingStrategy,

    /// Keep duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Disable value standardization
    #[arg(long)]
    no_standardize: bool,

    /// Disable type validation
    #[arg(long)]
    no_type_validation: bool,

    /// Denominator used by the standardization and type sub-scores
    #[arg(long, value_enum, default_value = "report-fields")]
    quality_denominator: CliQualityDenominator,

    /// Write the cleaned rows as CSV to this path
    #[arg(short, long)]
    output: Option<String>,

    /// Write CSV values without escaping embedded quotes
    #[arg(long, requires = "output")]
    legacy_csv: bool,

    /// Ask for cleaning suggestions (AI when GEMINI_API_KEY is set, rules otherwise)
    #[arg(long)]
    suggest: bool,

    /// Ask Gemini for data insights and chart recommendations
    #[arg(long)]
    insights: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    dotenv().ok();

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let dataset = load_dataset(&args.input)?;
    info!(
        "Dataset loaded: {} rows x {} columns ({:?})",
        dataset.rows.len(),
        dataset.columns.len(),
        dataset.format
    );

    let columns = resolve_columns(&dataset, args.columns.as_deref())?;

    let options = CleaningOptions::builder()
        .remove_duplicates(!args.keep_duplicates)
        .missing_value_strategy(args.missing.into())
        .standardize_values(!args.no_standardize)
        .validate_types(!args.no_type_validation)
        .quality_denominator(args.quality_denominator.into())
        .build()?;

    let pipeline = build_pipeline(&args, options)?;

    let result = match pipeline.clean_dataset(&dataset.rows, &columns) {
        Ok(result) => result,
        Err(e) => {
            error!("Cleaning failed: {}", e);
            return Err(anyhow!("Cleaning failed: {}", e));
        }
    };

    if let Some(ref output) = args.output {
        let quoting = if args.legacy_csv {
            CsvQuoting::Legacy
        } else {
            CsvQuoting::Escaped
        };
        write_csv(output, &result.cleaned_data, &dataset.columns, quoting)?;
    }

    let suggestion = args
        .suggest
        .then(|| pipeline.suggest(&dataset.rows, &columns));
    let insights = args
        .insights
        .then(|| pipeline.insights(&dataset.rows, &columns));

    if args.json {
        let output = json!({
            "result": result,
            "displayScore": result.display_score(),
            "suggestion": suggestion,
            "insights": insights,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_human_readable_summary(
        &args,
        &result,
        &columns,
        suggestion.as_ref(),
        insights.as_ref(),
    );
    Ok(())
}

/// Columns to clean: all loaded columns, or the requested subset in request order.
fn resolve_columns(dataset: &LoadedDataset, requested: Option<&[String]>) -> Result<Vec<String>> {
    let Some(requested) = requested else {
        return Ok(dataset.columns.clone());
    };

    let mut columns = Vec::with_capacity(requested.len());
    for name in requested {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !dataset.columns.iter().any(|c| c == name) {
            return Err(CleaningError::ColumnNotFound(name.to_owned()).into());
        }
        columns.push(name.to_owned());
    }
    Ok(columns)
}

/// Build the pipeline with an optional Gemini provider
#[cfg(feature = "ai")]
fn build_pipeline(args: &Args, options: CleaningOptions) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().options(options);

    if args.suggest || args.insights {
        match env::var("GEMINI_API_KEY") {
            Ok(api_key) if !api_key.is_empty() => {
                info!("Suggestions and insights will use Gemini");
                builder = builder.ai_provider(Arc::new(GeminiProvider::new(api_key)?));
            }
            _ => warn!("GEMINI_API_KEY not set. AI suggestions and insights are unavailable."),
        }
    }

    Ok(with_progress_logging(builder, args.quiet).build()?)
}

/// Build the pipeline without AI support (fallback when "ai" feature is disabled)
#[cfg(not(feature = "ai"))]
fn build_pipeline(args: &Args, options: CleaningOptions) -> Result<Pipeline> {
    if args.suggest || args.insights {
        warn!("AI support not compiled in. Suggestions fall back to rules.");
        warn!("Insights are unavailable without AI support.");
        warn!("Compile with --features ai to enable AI support.");
    }

    let builder = Pipeline::builder().options(options);
    Ok(with_progress_logging(builder, args.quiet).build()?)
}

fn with_progress_logging(
    builder: datadash_cleaning::PipelineBuilder,
    quiet: bool,
) -> datadash_cleaning::PipelineBuilder {
    if quiet {
        return builder;
    }
    builder.on_progress(|update| {
        info!(
            "[{:.0}%] {}: {}",
            update.progress * 100.0,
            update.stage.display_name(),
            update.message
        );
    })
}

/// Print a human-readable summary of the cleaning run.
///
/// This is the default output when `--json` is not specified.
fn print_human_readable_summary(
    args: &Args,
    result: &CleaningResult,
    columns: &[String],
    suggestion: Option<&AdvisorySuggestion>,
    insights: Option<&DataInsights>,
) {
    let report = &result.cleaning_report;

    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Input:   {} ({} rows)", args.input, result.original_count);
    if let Some(ref output) = args.output {
        println!("Output:  {} ({} rows)", output, result.final_count);
    }
    println!("Columns: {}", columns.join(", "));
    println!();

    println!("Cleaning Report:");
    println!("  Duplicates removed:      {}", report.removed_duplicates);
    println!("  Rows removed (missing):  {}", report.rows_removed_missing);
    println!("  Missing values filled:   {}", report.filled_missing_values);
    println!("  Values standardized:     {}", report.standardized_values);
    println!("  Data types corrected:    {}", report.corrected_data_types);
    println!(
        "  Rows: {} -> {} ({} removed)",
        result.original_count,
        result.final_count,
        result.rows_removed()
    );
    println!();

    println!("Quality Score: {}/100", result.display_score());
    println!();

    if let Some(suggestion) = suggestion {
        println!(
            "Suggestions ({} priority, {}% confidence, ~{}):",
            suggestion.priority, suggestion.confidence, suggestion.estimated_time
        );
        for issue in &suggestion.issues {
            println!("  ! {}", issue);
        }
        for item in &suggestion.suggestions {
            println!("  - {}", item);
        }
        println!();
    }

    if let Some(insights) = insights {
        println!("Insights (charts: {}):", insights.recommended_charts.join(", "));
        for item in &insights.insights {
            println!("  * {}", item);
        }
        for item in &insights.patterns {
            println!("  ~ {}", item);
        }
        for item in &insights.recommendations {
            println!("  - {}", item);
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}
