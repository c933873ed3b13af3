use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(400);
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub debounce: Duration,
    pub copy_ack: Duration,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            debounce: DEBOUNCE_INTERVAL,
            copy_ack: COPY_ACK_DURATION,
            request_timeout: Duration::from_secs(10),
            log_file: PathBuf::from("sentinel_tui.log"),
            debug: false,
        }
    }
}

/// Defaults, then `.env`, then process environment, then command line flags.
pub fn load_settings() -> Settings {
    dotenv::dotenv().ok();
    let args: Vec<String> = env::args().skip(1).collect();
    resolve(&args, |key| env::var(key).ok())
}

pub fn resolve(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(v) = lookup("SENTINEL_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("SENTINEL_LOG_FILE") {
        settings.log_file = PathBuf::from(v);
    }
    if let Some(secs) = lookup("SENTINEL_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
        if secs > 0 {
            settings.request_timeout = Duration::from_secs(secs);
        }
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => settings.debug = true,
            "--url" => {
                if let Some(v) = iter.next() {
                    settings.base_url = v.clone();
                }
            }
            other => {
                if let Some(v) = other.strip_prefix("--url=") {
                    settings.base_url = v.to_string();
                }
            }
        }
    }

    settings.base_url = settings.base_url.trim_end_matches('/').to_string();
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = resolve(&[], |_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.debounce, Duration::from_millis(400));
        assert_eq!(settings.copy_ack, Duration::from_millis(2000));
    }

    #[test]
    fn test_flags_override_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SENTINEL_URL", "http://from-env:5000/"),
            ("SENTINEL_TIMEOUT_SECS", "3"),
            ("SENTINEL_LOG_FILE", "/tmp/sentinel.log"),
        ]);
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let settings = resolve(&[], lookup);
        assert_eq!(settings.base_url, "http://from-env:5000");
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.log_file, PathBuf::from("/tmp/sentinel.log"));
        assert!(!settings.debug);

        let settings = resolve(&args(&["--url", "http://flag:8080/", "--debug"]), lookup);
        assert_eq!(settings.base_url, "http://flag:8080");
        assert!(settings.debug);

        let settings = resolve(&args(&["--url=http://eq:1"]), lookup);
        assert_eq!(settings.base_url, "http://eq:1");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let settings = resolve(&[], |k| (k == "SENTINEL_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        let settings = resolve(&[], |k| (k == "SENTINEL_TIMEOUT_SECS").then(|| "0".to_string()));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }
}
