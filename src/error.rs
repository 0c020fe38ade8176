use std::path::PathBuf;

use thiserror::Error;

/// Every fatal condition the pipeline can hit.
///
/// Variants name the offending file, line or field so the operator can fix
/// the input without rerunning under a debugger.
#[derive(Debug, Error)]
pub enum ConvError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text directory should not contain files with suffixes other than .txt or .counts: {file}")]
    UnexpectedFile { file: String },

    #[error("missing .{missing} file for data source: {source_name}")]
    MissingPair {
        source_name: String,
        missing: &'static str,
    },

    #[error("bad data-weights line: '{line}': {reason}")]
    MalformedWeightLine { line: String, reason: String },

    #[error("duplicated data source ({name}) specified in data-weights: {path:?}")]
    DuplicateWeight { name: String, path: PathBuf },

    #[error("weight for data source '{name}' not set")]
    MissingWeight { name: String },

    #[error("bad vocab line {line_number} in {path:?}: '{line}'")]
    MalformedVocabLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("duplicated word ({word}) in vocab: {path:?}")]
    DuplicateWord { word: String, path: PathBuf },

    #[error("word ids in vocab are not dense: expected id {expected}, found {found}")]
    IdDensity { expected: usize, found: usize },

    #[error("--unk-word={word} does not appear in vocab file {path:?}")]
    UnknownWordMissing { word: String, path: PathBuf },

    #[error(
        "an OOV word {word} is present in the text file {path:?} but you have not \
         specified an unknown word to map it to (--unk-word option)"
    )]
    OutOfVocabulary { word: String, path: PathBuf },

    #[error("bad transcript line {line_number} in {path:?}: {reason}")]
    MalformedTranscriptLine {
        path: PathBuf,
        line_number: usize,
        reason: String,
    },

    #[error("invalid source registry: {0}")]
    Registry(String),
}

impl ConvError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvError>;
