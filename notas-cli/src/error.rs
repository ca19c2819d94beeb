//! Fatal pipeline errors and their process exit codes

use std::path::PathBuf;

use crate::dataset::SchemaMismatchError;
use crate::ingest::SourceReadError;

/// Exit status for failures that are not one of the pipeline errors below
pub const EXIT_FAILURE: u8 = 1;

/// Errors that end a run without producing output
#[derive(Debug)]
pub enum PipelineError {
    /// No source could be read (or none was found)
    NoValidSources {
        /// Sources that were found but could not be read
        skipped: Vec<SourceReadError>,
    },
    /// Sources disagree on column count
    SchemaMismatch(SchemaMismatchError),
    /// An output file could not be written
    ArtifactWrite { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::NoValidSources { .. } => 2,
            PipelineError::SchemaMismatch(_) => 3,
            PipelineError::ArtifactWrite { .. } => EXIT_FAILURE,
        }
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::NoValidSources { skipped } if skipped.is_empty() => {
                write!(f, "no spreadsheet files found")
            }
            PipelineError::NoValidSources { skipped } => {
                write!(
                    f,
                    "no valid spreadsheet files could be read ({} skipped)",
                    skipped.len()
                )
            }
            PipelineError::SchemaMismatch(_) => write!(f, "cannot merge sources"),
            PipelineError::ArtifactWrite { path, reason } => {
                write!(f, "failed to write '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::SchemaMismatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaMismatchError> for PipelineError {
    fn from(err: SchemaMismatchError) -> Self {
        PipelineError::SchemaMismatch(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_from_success() {
        let none = PipelineError::NoValidSources { skipped: vec![] };
        let mismatch = PipelineError::SchemaMismatch(SchemaMismatchError { sources: vec![] });
        let write = PipelineError::ArtifactWrite {
            path: PathBuf::from("out.html"),
            reason: "permission denied".to_string(),
        };

        assert_eq!(none.exit_code(), 2);
        assert_eq!(mismatch.exit_code(), 3);
        assert_eq!(write.exit_code(), EXIT_FAILURE);
        assert!(write.to_string().contains("out.html"));
    }

    #[test]
    fn test_no_sources_message_mentions_skips() {
        let err = PipelineError::NoValidSources {
            skipped: vec![SourceReadError::new(std::path::Path::new("a.xlsx"), "bad zip")],
        };
        assert!(err.to_string().contains("1 skipped"));
    }
}
