use std::path::PathBuf;

/// Everything that can go wrong while processing one episode file.
///
/// The outer batch loop pattern-matches on the variant to decide whether to
/// skip the file or abort the whole run, so variants must stay distinct even
/// when their messages look alike.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} does not seem to be a valid TV show filename")]
    InvalidFilename(PathBuf),

    #[error("show not found on Addic7ed: {0}")]
    ShowNotFound(String),

    #[error("episode not found on Addic7ed: {show} S{season:02}E{episode:02}")]
    EpisodeNotFound {
        show: String,
        season: u32,
        episode: u32,
    },

    #[error("Addic7ed does not support language '{0}'")]
    LanguageNotSupported(String),

    #[error("HTML parsing failed: {0}")]
    Parsing(String),

    #[error("no acceptable subtitle found")]
    NoSubtitleFound,

    #[error("the subtitle could not be downloaded: {0}")]
    Download(String),

    #[error("the downloaded subtitle could not be saved as {path}: {source}")]
    CannotSave {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, Error>;
