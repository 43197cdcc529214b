// Error types for turismo-bogota

use snafu::Snafu;
use std::{io, path::PathBuf};

#[derive(Debug, Snafu)]
pub enum TurismoError {
    // Errors while loading the static data files
    #[snafu(display("Unable to open data file {}: {source}", path.display()))]
    DataFileOpen { path: PathBuf, source: io::Error },
    #[snafu(display("Malformed data file {} (line {line}): {source}", path.display()))]
    DataFileParse {
        path: PathBuf,
        line: u64,
        source: csv::Error,
    },
    #[snafu(display("Malformed data file {} (line {line}): {reason}", path.display()))]
    DataFileInvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[snafu(display("Recommendation table has no rows for profile group {group}"))]
    MissingRecommendations { group: String },
    #[snafu(display("Unknown profile group label: {label}"))]
    UnknownProfileGroup { label: String },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
    #[snafu(display(
        "Expected {expected_numeric} numeric and {expected_choices} choice answers but got {actual_numeric} and {actual_choices}"
    ))]
    AnswerCountMismatch {
        expected_numeric: usize,
        actual_numeric: usize,
        expected_choices: usize,
        actual_choices: usize,
    },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file: {source}"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file: {source}"))]
    ConfigSerializeError { source: serde_json::Error },

    // Answer sheet and batch errors
    #[snafu(display("Error reading answer sheet {}: {source}", path.display()))]
    AnswerSheetIOError { path: PathBuf, source: io::Error },
    #[snafu(display("Error parsing answer sheet {}: {source}", path.display()))]
    AnswerSheetParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[snafu(display("Error writing batch results: {source}"))]
    WriterError { source: io::Error },

    // UI errors
    #[snafu(display("Could not start the dashboard window: {reason}"))]
    GuiError { reason: String },
}
