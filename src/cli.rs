//! CLI definition and dispatch.

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_calendar_adapter::CsvCalendarAdapter;
use crate::adapters::csv_market_adapter::CsvMarketAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::demo_adapter::DemoAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_digest_adapter::HtmlDigestAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::analysis::{
    run_analysis, AnalysisConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_HORIZON_DAYS, DEFAULT_SYMBOLS,
    DEFAULT_TOP_EVENTS,
};
use crate::domain::config_validation::{
    data_source, read_weights, validate_analysis_config, validate_data_config,
};
use crate::domain::error::VolscanError;
use crate::domain::event_impact::EventImpactScore;
use crate::domain::indicator::{IndicatorParams, DEFAULT_BAND_MULTIPLIER, DEFAULT_WINDOW};
use crate::domain::recommendation::{classify, RULE_TABLE};
use crate::domain::report::Report;
use crate::domain::score::VolatilityScore;
use crate::domain::symbols::parse_symbols;
use crate::ports::config_port::ConfigPort;
use crate::ports::notification_port::NotificationPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_OUTPUT_DIR: &str = "reports";

#[derive(Parser, Debug)]
#[command(
    name = "volscan",
    about = "Daily crypto volatility scoring and trading recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every configured symbol and write the reports
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Run date (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        date: Option<String>,
        /// Comma-separated symbols, overrides [analysis] symbols
        #[arg(long)]
        symbols: Option<String>,
        /// Use built-in demo market data and calendar
        #[arg(long)]
        demo: bool,
        /// Output directory, overrides [report] output_dir
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify a single volatility score and event impact
    Classify {
        #[arg(long)]
        score: f64,
        #[arg(long, default_value_t = 0.0)]
        impact: f64,
    },
    /// Print the recommendation rule table
    Rules,
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn execute(command: Command) -> Result<(), VolscanError> {
    match command {
        Command::Analyze {
            config,
            date,
            symbols,
            demo,
            output,
        } => run_analyze(
            config.as_deref(),
            date.as_deref(),
            symbols.as_deref(),
            demo,
            output.as_deref(),
        ),
        Command::Classify { score, impact } => run_classify(score, impact),
        Command::Rules => {
            print_rules();
            Ok(())
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, VolscanError> {
    match path {
        Some(path) => {
            info!("loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => FileConfigAdapter::from_string(""),
    }
}

pub fn build_analysis_config(config: &dyn ConfigPort) -> Result<AnalysisConfig, VolscanError> {
    let symbols = match config.get_string("analysis", "symbols") {
        Some(raw) => parse_symbols(&raw).map_err(|e| VolscanError::ConfigInvalid {
            section: "analysis".into(),
            key: "symbols".into(),
            reason: e.to_string(),
        })?,
        None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
    };

    let window = config.get_int("analysis", "window", DEFAULT_WINDOW as i64);
    let history_limit = config.get_int("analysis", "history_limit", DEFAULT_HISTORY_LIMIT as i64);
    let horizon_days = config.get_int("analysis", "horizon_days", DEFAULT_HORIZON_DAYS as i64);
    let top_events = config.get_int("report", "top_events", DEFAULT_TOP_EVENTS as i64);

    Ok(AnalysisConfig {
        params: IndicatorParams {
            window: non_negative("analysis", "window", window)?,
            band_multiplier: config.get_double(
                "analysis",
                "band_multiplier",
                DEFAULT_BAND_MULTIPLIER,
            ),
        },
        weights: read_weights(config),
        history_limit: non_negative("analysis", "history_limit", history_limit)?,
        horizon_days: u32::try_from(horizon_days).map_err(|_| VolscanError::ConfigInvalid {
            section: "analysis".into(),
            key: "horizon_days".into(),
            reason: format!("{} is out of range", horizon_days),
        })?,
        top_events: non_negative("report", "top_events", top_events)?,
        symbols,
    })
}

fn non_negative(section: &str, key: &str, value: i64) -> Result<usize, VolscanError> {
    usize::try_from(value).map_err(|_| VolscanError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: format!("{} must not be negative", value),
    })
}

pub fn parse_run_date(date: Option<&str>) -> Result<NaiveDate, VolscanError> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            VolscanError::MalformedInput {
                reason: format!("invalid date '{}' (expected YYYY-MM-DD)", raw),
            }
        }),
        None => Ok(Utc::now().date_naive()),
    }
}

/// The `--symbols` flag wins over the configured list.
pub fn resolve_symbols(
    symbols_override: Option<&str>,
    configured: Vec<String>,
) -> Result<Vec<String>, VolscanError> {
    match symbols_override {
        Some(raw) => parse_symbols(raw).map_err(|e| VolscanError::MalformedInput {
            reason: format!("--symbols: {}", e),
        }),
        None => Ok(configured),
    }
}

fn config_path(config: &dyn ConfigPort, key: &str) -> Result<PathBuf, VolscanError> {
    config
        .get_string("data", key)
        .map(PathBuf::from)
        .ok_or_else(|| VolscanError::ConfigMissing {
            section: "data".into(),
            key: key.into(),
        })
}

fn run_analyze(
    config_path_arg: Option<&Path>,
    date: Option<&str>,
    symbols_override: Option<&str>,
    demo: bool,
    output_override: Option<&Path>,
) -> Result<(), VolscanError> {
    // Stage 1: Load and validate config
    let config = load_config(config_path_arg)?;
    validate_analysis_config(&config)?;
    let demo = demo || data_source(&config) == "demo";
    if !demo {
        validate_data_config(&config)?;
    }

    // Stage 2: Resolve run parameters
    let mut analysis_config = build_analysis_config(&config)?;
    analysis_config.symbols = resolve_symbols(symbols_override, analysis_config.symbols)?;
    let today = parse_run_date(date)?;

    // Stage 3: Wire data sources and run
    let report = if demo {
        info!("demo mode: using built-in market data and calendar");
        let adapter = DemoAdapter::new(today);
        run_analysis(&adapter, &adapter, &analysis_config, today)
    } else {
        let market = CsvMarketAdapter::new(config_path(&config, "candles_dir")?);
        let calendar = CsvCalendarAdapter::new(config_path(&config, "calendar_file")?);
        run_analysis(&market, &calendar, &analysis_config, today)
    };

    if report.assets.is_empty() {
        return Err(VolscanError::NoResults);
    }

    // Stage 4: Console summary
    print_summary(&report, analysis_config.top_events);

    // Stage 5: Reports
    let output_dir = output_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "output_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    write_outputs(&config, &report, &output_dir, analysis_config.top_events)
}

fn write_outputs(
    config: &dyn ConfigPort,
    report: &Report,
    output_dir: &Path,
    top_events: usize,
) -> Result<(), VolscanError> {
    let stem = format!("volscan-{}", report.run_date);

    if config.get_bool("report", "csv", true) {
        let path = output_dir.join(format!("{stem}.csv"));
        CsvReportAdapter::new().write(report, &path.to_string_lossy())?;
        info!("spreadsheet written to {}", path.display());
    }
    if config.get_bool("report", "json", false) {
        let path = output_dir.join(format!("{stem}.json"));
        JsonReportAdapter::new(config.get_bool("report", "pretty_json", true))
            .write(report, &path.to_string_lossy())?;
        info!("json report written to {}", path.display());
    }
    if config.get_bool("report", "digest", true) {
        let path = output_dir.join(format!("{stem}-digest.html"));
        let summary = report.summary(top_events);
        HtmlDigestAdapter::new().notify(report, &summary, &path.to_string_lossy())?;
        info!(
            "digest written to {} ({})",
            path.display(),
            HtmlDigestAdapter::subject(&summary)
        );
    }
    Ok(())
}

fn print_summary(report: &Report, top_events: usize) {
    println!(
        "Volatility report for {} (event impact {})",
        report.run_date, report.event_impact
    );
    println!(
        "{:<10} {:>14} {:>8} {:>8} {:>8} {:>6}  {:<24} {}",
        "SYMBOL", "PRICE", "HV", "ATR", "BBW", "SCORE", "ACTION", "RISK"
    );
    for asset in report.assets.values() {
        println!(
            "{:<10} {:>14.4} {:>8} {:>8} {:>8} {:>6.2}  {:<24} {}",
            asset.symbol,
            asset.price,
            reading(asset.indicators.hv.value()),
            reading(asset.indicators.atr.value()),
            reading(asset.indicators.bbw.value()),
            asset.volatility_score.value(),
            asset.recommendation.action.label(),
            asset.recommendation.risk_level.label(),
        );
    }
    for skipped in &report.skipped {
        warn!("{} skipped: {}", skipped.symbol, skipped.reason);
    }

    let summary = report.summary(top_events);
    if let Some(avg) = summary.average_volatility {
        println!("\nAverage volatility: {:.2}", avg);
    }
    if let Some(regime) = summary.regime {
        println!("{}", regime.insight());
    }
    if !summary.top_events.is_empty() {
        println!("\nUpcoming events:");
        for event in summary.top_events {
            println!(
                "  {} {:>5}  {:<8} {} ({})",
                event.date,
                event.time,
                event.impact.label(),
                event.event,
                event.country
            );
        }
    }
}

fn reading(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

fn unit_interval(name: &str, value: f64) -> Result<f64, VolscanError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(VolscanError::MalformedInput {
            reason: format!("{} must be within [0, 1], got {}", name, value),
        });
    }
    Ok(value)
}

fn run_classify(score: f64, impact: f64) -> Result<(), VolscanError> {
    let score = VolatilityScore::new(unit_interval("--score", score)?);
    let impact = EventImpactScore::new(unit_interval("--impact", impact)?);
    let rec = classify(score, impact);
    println!("Action:   {}", rec.action);
    println!("Risk:     {}", rec.risk_level);
    println!("Strategy: {}", rec.strategy);
    Ok(())
}

fn print_rules() {
    println!(
        "{:<12} {:>9}  {:<24} {:<20} {}",
        "VOLATILITY", "EVENT", "ACTION", "RISK", "STRATEGY"
    );
    for band in &RULE_TABLE {
        let range = if band.floor == 0.0 {
            format!("[{:.1}, {:.1}]", band.floor, band.ceiling)
        } else {
            format!("({:.1}, {:.1}]", band.floor, band.ceiling)
        };
        for (condition, outcome) in [
            (format!("> {:.1}", band.event_threshold), &band.high_event),
            (format!("<= {:.1}", band.event_threshold), &band.low_event),
        ] {
            println!(
                "{:<12} {:>9}  {:<24} {:<20} {}",
                range,
                condition,
                outcome.action.label(),
                outcome.risk.label(),
                outcome.strategy
            );
        }
    }
}

fn run_validate(config_path: &Path) -> Result<(), VolscanError> {
    let config = load_config(Some(config_path))?;
    validate_analysis_config(&config)?;
    validate_data_config(&config)?;
    let analysis = build_analysis_config(&config)?;

    println!("Configuration is valid.");
    println!("  source:        {}", data_source(&config));
    println!("  symbols:       {}", analysis.symbols.join(", "));
    println!(
        "  window:        {} (band multiplier {})",
        analysis.params.window, analysis.params.band_multiplier
    );
    println!(
        "  weights:       hv {} / atr {} / bbw {} / event {}",
        analysis.weights.hv, analysis.weights.atr, analysis.weights.bbw, analysis.weights.event
    );
    println!("  history_limit: {}", analysis.history_limit);
    println!("  horizon_days:  {}", analysis.horizon_days);
    Ok(())
}
