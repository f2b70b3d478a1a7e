use thiserror::Error;

/// Fatal engine errors. Malformed CSV *content* is never fatal — the
/// normalizer reports it through diagnostics instead — so this covers only
/// the paths where no dataset can be produced at all.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("unrecognized data file '{0}': expected a sales dump or sales funnel export")]
    UnrecognizedFile(String),
}
