//! Review Export
//!
//! Fetches app reviews from MongoDB using the parameters of a YAML query file
//! and saves them to a CSV file.
//!
//! # Usage
//!
//! ```bash
//! export MONGO_URI=mongodb://localhost:27017
//! review-export --config config/consulta.yaml --output data/output/reviews_export.csv
//! ```

use tracing::{debug, info, warn};

use review_export::cli::CliInterface;
use review_export::config::LoggingConfig;
use review_export::{ReviewExporter, status_message};

/// Application entry point
///
/// The run is one sequence of awaited steps, so a current-thread runtime is
/// all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let dotenv_error = load_dotenv();

    let cli = CliInterface::new();
    initialize_logging(&cli.settings().logging);

    if let Some(e) = dotenv_error {
        warn!("Ignoring .env file: {}", e);
    }

    if let Some(uri) = cli.sanitized_uri() {
        info!("Using MongoDB at {}", uri);
    }
    debug!("Settings: {:?}", cli.settings());

    let exporter = ReviewExporter::new(cli.into_settings());
    let result = exporter.run().await;
    let message = status_message(&result);

    match result {
        Ok(_) => println!("{}", message),
        Err(e) => {
            debug!("Run failed with {}", e.kind());
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

/// Load variables from a `.env` file in the working directory, if any
///
/// Runs before logging is set up, so a problem is handed back to be logged
/// later instead of being reported here.
fn load_dotenv() -> Option<dotenvy::Error> {
    dotenv_problem(dotenvy::dotenv())
}

/// The error worth reporting from a `.env` load; a missing file is not one
fn dotenv_problem<T>(result: dotenvy::Result<T>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(e),
    }
}

/// Initialize logging system based on the logging configuration
///
/// Logs go to stderr so stdout only carries the status message.
fn initialize_logging(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.level.to_tracing_level())
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = dotenvy::from_path(dir.path().join(".env"));
        assert!(dotenv_problem(result).is_none());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "REVIEW_EXPORT_TEST_BROKEN='unterminated\n").unwrap();

        let problem = dotenv_problem(dotenvy::from_path(&path));
        assert!(matches!(problem, Some(dotenvy::Error::LineParse(..))));
    }

    #[test]
    fn test_loaded_env_file_is_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "REVIEW_EXPORT_TEST_LOADED=1\n").unwrap();

        assert!(dotenv_problem(dotenvy::from_path(&path)).is_none());
    }
}
