use std::path::PathBuf;

use thiserror::Error;

/// Structured errors for the handful of failure modes this engine
/// distinguishes. None of these abort the process on their own —
/// callers log a diagnostic and fall back to the conservative default
/// (see spec's error-handling table: recovery is always local).
#[derive(Debug, Error)]
pub enum ReanalyzeError {
    #[error("could not read diff file {path}: {source}")]
    DiffRead { path: PathBuf, source: std::io::Error },

    #[error("could not parse diff file {path}: {source}")]
    DiffParse { path: PathBuf, source: serde_json::Error },

    #[error("could not read AST document {path}: {source}")]
    AstRead { path: PathBuf, source: std::io::Error },

    #[error("could not parse AST document {path}: {source}")]
    AstParse { path: PathBuf, source: serde_json::Error },

    #[error("could not open output file {path}: {source}")]
    OutputOpen { path: PathBuf, source: std::io::Error },
}

impl From<std::io::Error> for ReanalyzeError {
    // lets emitters use `?` directly against a `dyn Write`
    fn from(source: std::io::Error) -> Self {
        ReanalyzeError::OutputOpen { path: PathBuf::new(), source }
    }
}

/// Exit codes. spec.md's error table leaves every recoverable failure
/// local to the component that hit it, so only an unparseable command
/// line produces a non-zero exit.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 1;
}
