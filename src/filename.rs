use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Result};

// "Show.Name.S01E02.720p.HDTV.x264-GRP" and "Show Name 1x02 GRP" styles.
static SXXEXX: OnceLock<Regex> = OnceLock::new();
static NXN: OnceLock<Regex> = OnceLock::new();

fn sxxexx() -> &'static Regex {
    SXXEXX.get_or_init(|| {
        Regex::new(r"(?i)^(?P<show>.+?)[ _.-]+s(?P<season>\d{1,2})[ _.-]?e(?P<episode>\d{1,2})(?:[ _.-]+(?P<tags>.*))?$").unwrap()
    })
}

fn nxn() -> &'static Regex {
    NXN.get_or_init(|| {
        Regex::new(r"(?i)^(?P<show>.+?)[ _.-]+(?P<season>\d{1,2})x(?P<episode>\d{1,2})(?:[ _.-]+(?P<tags>.*))?$").unwrap()
    })
}

/// A video file identified as a TV episode. `version` is the raw release tail
/// of the basename (e.g. "720p.HDTV.x264-LOL"); normalization happens later,
/// at comparison time.
#[derive(Debug, Clone)]
pub struct Filename {
    pub path: PathBuf,
    pub show: String,
    pub season: u32,
    pub episode: u32,
    pub version: String,
}

impl Filename {
    pub fn parse(path: &Path) -> Result<Self> {
        let basename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFilename(path.to_path_buf()))?;

        let caps = sxxexx()
            .captures(basename)
            .or_else(|| nxn().captures(basename))
            .ok_or_else(|| Error::InvalidFilename(path.to_path_buf()))?;

        let show = caps["show"].replace(['.', '_'], " ").trim().to_string();
        let season = caps["season"]
            .parse()
            .map_err(|_| Error::InvalidFilename(path.to_path_buf()))?;
        let episode = caps["episode"]
            .parse()
            .map_err(|_| Error::InvalidFilename(path.to_path_buf()))?;
        let version = caps
            .name("tags")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Ok(Filename {
            path: path.to_path_buf(),
            show,
            season,
            episode,
            version,
        })
    }

    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The path the downloaded subtitle should be saved to.
    pub fn subtitle_path(&self) -> PathBuf {
        self.path.with_extension("srt")
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S{:02}E{:02} [{}]",
            self.show, self.season, self.episode, self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sxxexx_style() {
        let f = Filename::parse(Path::new("The.Walking.Dead.S03E12.720p.HDTV.x264-EVOLVE.mkv"))
            .unwrap();
        assert_eq!(f.show, "The Walking Dead");
        assert_eq!(f.season, 3);
        assert_eq!(f.episode, 12);
        assert_eq!(f.version, "720p.HDTV.x264-EVOLVE");
    }

    #[test]
    fn test_parse_nxn_style() {
        let f = Filename::parse(Path::new("Game of Thrones 2x09 HDTV-ASAP.avi")).unwrap();
        assert_eq!(f.show, "Game of Thrones");
        assert_eq!(f.season, 2);
        assert_eq!(f.episode, 9);
        assert_eq!(f.version, "HDTV-ASAP");
    }

    #[test]
    fn test_parse_with_directory_and_underscores() {
        let f = Filename::parse(Path::new("/videos/Californication_S06E07_HDTV_x264-2HD.mp4"))
            .unwrap();
        assert_eq!(f.show, "Californication");
        assert_eq!(f.season, 6);
        assert_eq!(f.episode, 7);
        assert_eq!(f.version, "HDTV_x264-2HD");
    }

    #[test]
    fn test_parse_without_release_tags() {
        let f = Filename::parse(Path::new("Sherlock - S02E01.mkv")).unwrap();
        assert_eq!(f.show, "Sherlock");
        assert_eq!(f.version, "");
    }

    #[test]
    fn test_parse_rejects_non_episode_names() {
        for name in ["holiday_video.mkv", "IMG_1234.mov", "notes.txt"] {
            assert!(matches!(
                Filename::parse(Path::new(name)),
                Err(Error::InvalidFilename(_))
            ));
        }
    }

    #[test]
    fn test_subtitle_path_replaces_extension() {
        let f = Filename::parse(Path::new("/videos/Show.S01E01.HDTV-LOL.mkv")).unwrap();
        assert_eq!(
            f.subtitle_path(),
            PathBuf::from("/videos/Show.S01E01.HDTV-LOL.srt")
        );
    }
}
