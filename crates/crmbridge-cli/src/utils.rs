//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use std::path::Path;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing.
///
/// Logs go to stderr; stdout belongs to command output and the MCP stdio channel.
pub fn init_tracing(verbose: bool) -> CliResult<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(colored::control::SHOULD_COLORIZE.should_colorize())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn dim(msg: &str) -> ColoredString {
        msg.dimmed()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Validate file exists and is readable
pub fn validate_file_exists(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Read tool arguments from either a command line argument or a file
pub fn read_input_data(
    input: Option<&str>,
    input_file: Option<&Path>,
) -> CliResult<serde_json::Value> {
    match (input, input_file) {
        (Some(input_str), None) => serde_json::from_str(input_str)
            .map_err(|e| CliError::InvalidArgument(format!("Invalid JSON input: {}", e))),
        (None, Some(file_path)) => {
            validate_file_exists(file_path)?;
            let content = std::fs::read_to_string(file_path)?;

            // JSON first, then YAML
            if let Ok(json_data) = serde_json::from_str::<serde_json::Value>(&content) {
                Ok(json_data)
            } else {
                serde_yaml::from_str(&content).map_err(|e| {
                    CliError::InvalidArgument(format!(
                        "Invalid JSON/YAML input file '{}': {}",
                        file_path.display(),
                        e
                    ))
                })
            }
        }
        (None, None) => Ok(serde_json::json!({})),
        (Some(_), Some(_)) => Err(CliError::InvalidArgument(
            "--input and --input-file cannot be used together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("List people and organisations", 12), "List peop...");
        assert_eq!(truncate_text("Überprüfung", 6), "Übe...");
    }

    #[test]
    fn test_read_inline_input() {
        assert_eq!(read_input_data(Some(r#"{"id": 1}"#), None).unwrap(), json!({"id": 1}));
        assert_eq!(read_input_data(None, None).unwrap(), json!({}));
        assert!(matches!(
            read_input_data(Some("{oops"), None),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_read_yaml_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "subject: Printer on fire\npriority: 4").unwrap();

        let value = read_input_data(None, Some(file.path())).unwrap();
        assert_eq!(value, json!({"subject": "Printer on fire", "priority": 4}));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input_data(None, Some(Path::new("/nonexistent/args.json"))).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
