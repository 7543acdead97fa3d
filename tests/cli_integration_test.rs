//! CLI integration tests: INI files, candle and calendar CSVs on disk, reports
//! written to a temporary output directory.

use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use volscan::cli::{self, Cli};
use volscan::domain::error::VolscanError;

const RUN_DATE: &str = "2024-06-03";

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_candles(dir: &Path, symbol: &str, days: usize) {
    let mut csv = String::from("open_time,open,high,low,close,volume\n");
    for i in 0..days {
        let close = 100.0 + ((i * 7) % 11) as f64;
        csv.push_str(&format!(
            "2024-05-{:02},{},{},{},{},{}\n",
            i + 1,
            close - 0.5,
            close + 2.0,
            close - 2.0,
            close,
            1000 + i
        ));
    }
    fs::write(dir.join(format!("{symbol}.csv")), csv).unwrap();
}

const CALENDAR: &str = "date,time,event,country,impact,forecast,previous,actual\n\
    2024-06-04,18:00,FOMC Meeting Minutes,United States,High,N/A,N/A,\n\
    2024-06-05,12:45,ECB Interest Rate Decision,Eurozone,High,3.75%,3.75%,\n\
    2024-06-07,01:30,China Manufacturing PMI,China,Medium,50.3,50.1,\n";

struct Fixture {
    dir: TempDir,
    ini: tempfile::NamedTempFile,
}

impl Fixture {
    fn new(extra_report: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let candles = dir.path().join("candles");
        fs::create_dir_all(&candles).unwrap();
        write_candles(&candles, "BTCUSDT", 31);
        write_candles(&candles, "ETHUSDT", 31);
        let calendar = dir.path().join("calendar.csv");
        fs::write(&calendar, CALENDAR).unwrap();

        let ini = write_temp_ini(&format!(
            "[analysis]\nsymbols = BTCUSDT, ETHUSDT, SOLUSDT\n\n\
             [data]\nsource = csv\ncandles_dir = {}\ncalendar_file = {}\n\n\
             [report]\n{}\n",
            candles.display(),
            calendar.display(),
            extra_report
        ));
        Self { dir, ini }
    }

    fn output(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn analyze(&self, extra: &[&str]) -> Result<(), VolscanError> {
        let config = self.ini.path().to_str().unwrap().to_string();
        let output = self.output().to_str().unwrap().to_string();
        let mut args = vec![
            "volscan",
            "analyze",
            "--config",
            config.as_str(),
            "--date",
            RUN_DATE,
            "--output",
            output.as_str(),
        ];
        args.extend_from_slice(extra);
        cli::execute(Cli::parse_from(args).command)
    }
}

#[test]
fn analyze_writes_spreadsheet_and_digest() {
    let fixture = Fixture::new("");
    fixture.analyze(&[]).unwrap();

    let out = fixture.output();
    let trading = fs::read_to_string(out.join("volscan-2024-06-03.csv")).unwrap();
    let lines: Vec<_> = trading.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2024-06-03,BTCUSDT,"));
    assert!(lines[2].starts_with("2024-06-03,ETHUSDT,"));

    let events = fs::read_to_string(out.join("volscan-2024-06-03-events.csv")).unwrap();
    assert_eq!(events.lines().count(), 4);

    let digest = fs::read_to_string(out.join("volscan-2024-06-03-digest.html")).unwrap();
    assert!(digest.contains("Crypto Trading Recommendations - 2024-06-03"));
    assert!(digest.contains("SOLUSDT (data source: failed to read"));
    assert!(!out.join("volscan-2024-06-03.json").exists());
}

#[test]
fn analyze_honours_report_switches() {
    let fixture = Fixture::new("csv = no\ndigest = off\njson = yes");
    fixture.analyze(&[]).unwrap();

    let out = fixture.output();
    assert!(!out.join("volscan-2024-06-03.csv").exists());
    assert!(!out.join("volscan-2024-06-03-digest.html").exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("volscan-2024-06-03.json")).unwrap())
            .unwrap();
    assert_eq!(json["run_date"], RUN_DATE);
    assert_eq!(json["events"].as_array().unwrap().len(), 3);
    assert!(json["assets"]["BTCUSDT"]["volatility_score"].is_number());
    assert_eq!(json["skipped"][0]["symbol"], "SOLUSDT");
}

#[test]
fn symbols_flag_restricts_run() {
    let fixture = Fixture::new("json = yes\ncsv = no\ndigest = no");
    fixture.analyze(&["--symbols", "ethusdt"]).unwrap();

    let json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(fixture.output().join("volscan-2024-06-03.json")).unwrap(),
    )
    .unwrap();
    let assets = json["assets"].as_object().unwrap();
    assert_eq!(assets.len(), 1);
    assert!(assets.contains_key("ETHUSDT"));
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn analyze_with_no_usable_symbols_fails() {
    let fixture = Fixture::new("");
    let result = fixture.analyze(&["--symbols", "DOGEUSDT,ADAUSDT"]);
    assert!(matches!(result, Err(VolscanError::NoResults)));
}

#[test]
fn analyze_rejects_bad_date() {
    let fixture = Fixture::new("");
    let config = fixture.ini.path().to_str().unwrap().to_string();
    let cli = Cli::parse_from([
        "volscan",
        "analyze",
        "--config",
        config.as_str(),
        "--date",
        "June 3rd",
    ]);
    assert!(matches!(
        cli::execute(cli.command),
        Err(VolscanError::MalformedInput { .. })
    ));
}

#[test]
fn analyze_demo_needs_no_config() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("demo");
    let cli = Cli::parse_from([
        "volscan",
        "analyze",
        "--demo",
        "--date",
        RUN_DATE,
        "--output",
        output.to_str().unwrap(),
    ]);
    cli::execute(cli.command).unwrap();

    let trading = fs::read_to_string(output.join("volscan-2024-06-03.csv")).unwrap();
    assert_eq!(trading.lines().count(), 6);
    assert!(trading.contains("BNBUSDT,585.35"));
    let digest = fs::read_to_string(output.join("volscan-2024-06-03-digest.html")).unwrap();
    assert!(digest.contains("Multiple high-impact economic events"));
}

#[test]
fn analyze_csv_source_without_paths_fails() {
    let ini = write_temp_ini("[data]\nsource = csv\n");
    let cli = Cli::parse_from(["volscan", "analyze", "--config", ini.path().to_str().unwrap()]);
    assert!(matches!(
        cli::execute(cli.command),
        Err(VolscanError::ConfigMissing { key, .. }) if key == "candles_dir"
    ));
}

#[test]
fn missing_config_file_is_parse_error() {
    let cli = Cli::parse_from(["volscan", "validate", "--config", "/nonexistent/volscan.ini"]);
    assert!(matches!(
        cli::execute(cli.command),
        Err(VolscanError::ConfigParse { .. })
    ));
}

#[test]
fn validate_accepts_good_config() {
    let fixture = Fixture::new("");
    let cli = Cli::parse_from([
        "volscan",
        "validate",
        "--config",
        fixture.ini.path().to_str().unwrap(),
    ]);
    assert!(cli::execute(cli.command).is_ok());
}

#[test]
fn validate_rejects_bad_weights() {
    let ini = write_temp_ini("[weights]\nhv = 0.5\natr = 0.5\n[data]\nsource = demo\n");
    let cli = Cli::parse_from(["volscan", "validate", "--config", ini.path().to_str().unwrap()]);
    assert!(matches!(
        cli::execute(cli.command),
        Err(VolscanError::ConfigInvalid { section, .. }) if section == "weights"
    ));
}

#[test]
fn classify_and_rules_commands() {
    let cli = Cli::parse_from(["volscan", "classify", "--score", "0.85", "--impact", "0.75"]);
    assert!(cli::execute(cli.command).is_ok());

    let cli = Cli::parse_from(["volscan", "classify", "--score", "1.2"]);
    assert!(matches!(
        cli::execute(cli.command),
        Err(VolscanError::MalformedInput { .. })
    ));

    let cli = Cli::parse_from(["volscan", "rules"]);
    assert!(cli::execute(cli.command).is_ok());
}
