use regex::Regex;
use std::sync::OnceLock;

// Release labels on Addic7ed are free text typed by uploaders. Stripping the
// encoder/resolution noise collapses cosmetic variants of the same release so
// that only the release-group token is compared.
static VERSION_PREFIX: OnceLock<Regex> = OnceLock::new();
static NOISE_TOKENS: OnceLock<Regex> = OnceLock::new();

fn version_prefix() -> &'static Regex {
    VERSION_PREFIX.get_or_init(|| Regex::new(r"(?i)^version *").unwrap())
}

fn noise_tokens() -> &'static Regex {
    NOISE_TOKENS.get_or_init(|| Regex::new(r"(?i)720p|hdtv|proper|rerip|x\.?264").unwrap())
}

/// Canonicalize a scraped release-version label.
///
/// Strips the "Version " prefix, removes resolution/encoder/repack markers,
/// trims separator runs and upper-cases the result. `None` counts as an empty
/// label; an all-noise label legitimately normalizes to the empty string.
pub fn normalize(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or("");
    let stripped = version_prefix().replace(raw, "");
    let stripped = noise_tokens().replace_all(&stripped, "");
    stripped
        .trim_matches(|c| matches!(c, '-' | ' ' | '.'))
        .to_uppercase()
}

/// Known pairs of interchangeable releases: the 720p rip listed on the right
/// shares line timing with the SD rip on the left. Stored one way, looked up
/// both ways. Curated data, not derived.
pub static COMPATIBILITY_720P: CompatibilityTable = CompatibilityTable {
    pairs: &[
        ("LOL", "DIMENSION"),
        ("SYS", "DIMENSION"),
        ("XII", "2HD"),
        ("ASAP", "IMMERSE"),
        ("EXCELLENCE", "REMARKABLE"),
    ],
};

pub struct CompatibilityTable {
    pairs: &'static [(&'static str, &'static str)],
}

impl CompatibilityTable {
    fn hd_counterpart(&self, sd: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(s, _)| *s == sd)
            .map(|(_, hd)| *hd)
    }

    /// Whether two normalized version tokens are interchangeable. Symmetric:
    /// the table is stored SD -> HD but checked in both directions.
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        a == b || self.hd_counterpart(a) == Some(b) || self.hd_counterpart(b) == Some(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(normalize(Some("Version 720p.HDTV.x264-LOL")), "LOL");
        assert_eq!(normalize(Some("Version LOL, 0.00 MBs")), "LOL, 0.00 MBS");
        assert_eq!(normalize(Some("720P.Proper-group")), "GROUP");
        assert_eq!(normalize(Some("-GROUP-")), "GROUP");
        assert_eq!(normalize(Some("x.264.RERIP.2HD")), "2HD");
    }

    #[test]
    fn test_normalize_case_insensitive_noise() {
        assert_eq!(normalize(Some("VERSION 720p.PROPER-GROUP")), "GROUP");
        assert_eq!(normalize(Some("version hdtv.X264-group")), "GROUP");
    }

    #[test]
    fn test_normalize_empty_and_absent() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        // A label made entirely of noise collapses to the empty string.
        assert_eq!(normalize(Some("720p.HDTV.x264")), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["Version 720p.HDTV.x264-LOL", "-GROUP-", "", "2hd"] {
            let once = normalize(Some(raw));
            assert_eq!(normalize(Some(once.as_str())), once);
        }
    }

    #[test]
    fn test_compatible_exact_match() {
        assert!(COMPATIBILITY_720P.compatible("LOL", "LOL"));
        assert!(COMPATIBILITY_720P.compatible("", ""));
        assert!(!COMPATIBILITY_720P.compatible("LOL", "KILLERS"));
    }

    #[test]
    fn test_compatible_is_symmetric() {
        for (a, b) in [("LOL", "DIMENSION"), ("ASAP", "IMMERSE"), ("LOL", "2HD")] {
            assert_eq!(
                COMPATIBILITY_720P.compatible(a, b),
                COMPATIBILITY_720P.compatible(b, a)
            );
        }
        assert!(COMPATIBILITY_720P.compatible("DIMENSION", "LOL"));
        assert!(COMPATIBILITY_720P.compatible("XII", "2HD"));
    }
}
