use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::addic7ed::Client;
use crate::error::{Error, Result};
use crate::filename::Filename;
use crate::languages;
use crate::select;
use crate::subtitle::Subtitle;
use crate::version::CompatibilityTable;

/// One episode being processed. Holds the parsed filename and a per-language
/// candidate pool so that listing the subtitles and then picking the best one
/// costs a single scrape per language.
pub struct Episode {
    pub filename: Filename,
    pools: HashMap<String, Vec<Subtitle>>,
}

impl Episode {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Episode {
            filename: Filename::parse(path)?,
            pools: HashMap::new(),
        })
    }

    pub fn subtitles(&mut self, client: &Client, language: &str) -> Result<&[Subtitle]> {
        let filename = self.filename.clone();
        self.pool_via(language, move || client.search(&filename, language))
    }

    pub fn best_subtitle(
        &mut self,
        client: &Client,
        language: &str,
        table: &CompatibilityTable,
    ) -> Result<&Subtitle> {
        let target_version = self.filename.version.clone();
        let pool = self.subtitles(client, language)?;
        select::best_subtitle(pool, &target_version, table).ok_or(Error::NoSubtitleFound)
    }

    /// Download the best candidate and save it next to the video file, with
    /// the extension replaced by `.srt`. Returns the path written to.
    pub fn download_best_subtitle(
        &mut self,
        client: &Client,
        language: &str,
        table: &CompatibilityTable,
    ) -> Result<PathBuf> {
        let referer = client.episode_url(&self.filename, languages::lookup(language)?.id);
        let path = self.filename.subtitle_path();
        let best = self.best_subtitle(client, language, table)?;
        let payload = client.download(&best.url, &referer)?;
        save(&path, &payload)?;
        Ok(path)
    }

    // The fetch is injected so the caching contract is testable without a
    // network round trip.
    fn pool_via<F>(&mut self, language: &str, fetch: F) -> Result<&[Subtitle]>
    where
        F: FnOnce() -> Result<Vec<Subtitle>>,
    {
        match self.pools.entry(language.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(fetch()?)),
        }
    }
}

fn save(path: &Path, payload: &[u8]) -> Result<()> {
    fs::write(path, payload).map_err(|source| Error::CannotSave {
        path: path.to_path_buf(),
        source,
    })
}
