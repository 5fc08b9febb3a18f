use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The candidate's letters are not all present in the target.
    #[error("cannot remove \"{candidate}\" from \"{target}\": not a sub-multiset")]
    InvalidSubtraction { target: String, candidate: String },

    #[error("could not load dictionary {}: {source}", path.display())]
    DictionaryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not load exclusion list {}: {source}", path.display())]
    ExclusionListUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed compiled dictionary: {0}")]
    DictionaryFormat(#[from] serde_json::Error),

    #[error("letter {0:?} has no weight")]
    UnknownLetter(char),

    #[error("letter {letter:?} cannot have weight {weight}: weights must be distinct primes")]
    InvalidWeight { letter: char, weight: u32 },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("the phrase contains no letters")]
    EmptyPhrase,
}

pub type Result<T> = std::result::Result<T, Error>;
