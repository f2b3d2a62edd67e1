use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input missing, unreadable, or rejected by every candidate encoding.
    #[error("could not read source {}: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// Only raised under the `reject` malformed-record policy.
    #[error("malformed record on line {line}: expected at least {expected} fields, found {fields}")]
    MalformedRecord {
        line: usize,
        fields: usize,
        expected: usize,
    },

    #[error("could not write output {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}
