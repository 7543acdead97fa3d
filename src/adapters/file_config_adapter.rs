//! INI file configuration adapter.

use crate::domain::error::VolscanError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VolscanError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| VolscanError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, VolscanError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| VolscanError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[analysis]
symbols = BTCUSDT, ETHUSDT ,SOLUSDT
window = 20
band_multiplier = 2.5

[weights]
hv = 0.4
event = 0.1

[data]
source = csv
candles_dir = /var/lib/volscan/candles

[report]
output_dir = out
json = no
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(
            adapter.get_string("data", "candles_dir"),
            Some("/var/lib/volscan/candles".to_string())
        );
        assert_eq!(adapter.get_int("analysis", "window", 14), 20);
        assert_eq!(adapter.get_double("analysis", "band_multiplier", 2.0), 2.5);
        assert_eq!(adapter.get_double("weights", "hv", 0.3), 0.4);
        assert!(!adapter.get_bool("report", "json", true));
    }

    #[test]
    fn get_list_trims_items() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(
            adapter.get_list("analysis", "symbols"),
            Some(vec![
                "BTCUSDT".to_string(),
                "ETHUSDT".to_string(),
                "SOLUSDT".to_string()
            ])
        );
        assert_eq!(adapter.get_list("analysis", "missing"), None);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nwindow = 14\n").unwrap();
        assert_eq!(adapter.get_string("analysis", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nwindow = abc\n").unwrap();
        assert_eq!(adapter.get_int("analysis", "window", 14), 14);
    }

    #[test]
    fn get_double_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[weights]\n").unwrap();
        assert_eq!(adapter.get_double("weights", "bbw", 0.2), 0.2);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[report]\na = true\nb = yes\nc = 1\nd = off\n")
                .unwrap();
        assert!(adapter.get_bool("report", "a", false));
        assert!(adapter.get_bool("report", "b", false));
        assert!(adapter.get_bool("report", "c", false));
        assert!(!adapter.get_bool("report", "d", true));
    }

    #[test]
    fn get_bool_returns_default_for_garbage() {
        let adapter = FileConfigAdapter::from_string("[report]\ncsv = maybe\n").unwrap();
        assert!(adapter.get_bool("report", "csv", true));
        assert!(!adapter.get_bool("report", "csv", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\nsource = demo\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("data", "source"), Some("demo".to_string()));
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/volscan.ini");
        assert!(matches!(
            result,
            Err(VolscanError::ConfigParse { file, .. }) if file == "/nonexistent/path/volscan.ini"
        ));
    }
}
