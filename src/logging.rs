use crate::config::LogConfig;
use anyhow::Context;
use std::env::VarError;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
const FILTER_ENV: &str = "GRIDSNAKE_LOG";

/// Install a global `tracing` subscriber that appends to the configured log
/// file.  The terminal belongs to the UI, so if no log file is configured,
/// nothing is installed and all log events are discarded.
pub(crate) fn init(cfg: &LogConfig) -> anyhow::Result<()> {
    let Some(path) = cfg.file.as_deref() else {
        return Ok(());
    };
    let filter = log_filter(std::env::var(FILTER_ENV), cfg)?;
    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")?;
    Ok(())
}

/// Build the log filter from the value of the `GRIDSNAKE_LOG` environment
/// variable if it is set, or else from the configured filter.  An invalid
/// filter from either source is an error.
fn log_filter(env: Result<String, VarError>, cfg: &LogConfig) -> anyhow::Result<EnvFilter> {
    match env {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {FILTER_ENV} value {directives:?}")),
        Err(VarError::NotPresent) => EnvFilter::try_new(&cfg.filter)
            .with_context(|| format!("invalid log filter {:?}", cfg.filter)),
        Err(e @ VarError::NotUnicode(_)) => Err(e).context(format!("invalid {FILTER_ENV} value")),
    }
}

fn open_log(path: &Path) -> anyhow::Result<fs_err::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).context("failed to create log directory")?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn no_file_no_subscriber() {
        let cfg = LogConfig::default();
        assert!(init(&cfg).is_ok());
    }

    #[rstest]
    #[case(Ok(String::from("gridsnake=trace")), "gridsnake=warn", LevelFilter::TRACE)]
    #[case(Err(VarError::NotPresent), "gridsnake=warn", LevelFilter::WARN)]
    #[case(Err(VarError::NotPresent), "gridsnake=debug", LevelFilter::DEBUG)]
    fn test_log_filter(
        #[case] env: Result<String, VarError>,
        #[case] configured: &str,
        #[case] max_level: LevelFilter,
    ) {
        let cfg = LogConfig {
            file: None,
            filter: String::from(configured),
        };
        let filter = log_filter(env, &cfg).unwrap();
        assert_eq!(filter.max_level_hint(), Some(max_level));
    }

    #[rstest]
    #[case(Ok(String::from("gridsnake=[[[notalevel")), "gridsnake=info")]
    #[case(Err(VarError::NotPresent), "gridsnake=[[[notalevel")]
    fn test_log_filter_invalid(#[case] env: Result<String, VarError>, #[case] configured: &str) {
        let cfg = LogConfig {
            file: None,
            filter: String::from(configured),
        };
        assert!(log_filter(env, &cfg).is_err());
    }

    #[test]
    fn open_log_creates_parents() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("logs").join("gridsnake.log");
        let file = open_log(&path).unwrap();
        drop(file);
        assert!(path.is_file());
    }
}
