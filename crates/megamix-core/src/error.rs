use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "Failed to find enough songs: needed {needed}, found {available} \
         (rating window {rating_lo}~{rating_hi} fully relaxed)"
    )]
    InsufficientCatalog {
        needed: usize,
        available: usize,
        rating_lo: f64,
        rating_hi: f64,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown song: {0}")]
    UnknownSong(String),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Mod data parse error: {0}")]
    ModDataParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reason a raw catalog record was rejected.
///
/// Record errors never abort a catalog build; the offending record is
/// logged and skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("song id 0 is reserved")]
    ReservedSongId,

    #[error("invalid dlc flag {0:?}")]
    InvalidDlcFlag(String),

    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),

    #[error("invalid difficulty rating {0:?}")]
    InvalidRating(String),

    #[error("title is empty after sanitizing")]
    EmptyTitle,

    #[error("item code {0} already claimed")]
    DuplicateItemCode(u64),
}
