use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::filename::Filename;
use crate::languages;
use crate::subtitle::{RawSubtitle, Subtitle};

const SITE_URL: &str = "http://www.addic7ed.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

static DOWNLOAD_COUNT: OnceLock<Regex> = OnceLock::new();
static VERSION_CELL: OnceLock<Regex> = OnceLock::new();

fn download_count() -> &'static Regex {
    DOWNLOAD_COUNT.get_or_init(|| Regex::new(r"(\d+) Downloads").unwrap())
}

fn version_cell() -> &'static Regex {
    VERSION_CELL.get_or_init(|| Regex::new(r"Version (.+?),").unwrap())
}

pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new() -> Result<Self> {
        // Addic7ed answers episode lookups for unknown shows with a redirect
        // to its home page, so redirects must surface instead of being
        // followed silently.
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::Unexpected(format!("cannot build HTTP client: {e}")))?;
        Ok(Client { http })
    }

    pub fn episode_url(&self, filename: &Filename, language_id: u32) -> String {
        format!(
            "{}/serie/{}/{}/{}/{}",
            SITE_URL,
            filename.show.replace(' ', "_"),
            filename.season,
            filename.episode,
            language_id
        )
    }

    /// Scrape the episode page for every subtitle offered in `language`.
    pub fn search(&self, filename: &Filename, language: &str) -> Result<Vec<Subtitle>> {
        let lang = languages::lookup(language)?;
        let url = self.episode_url(filename, lang.id);
        debug!("fetching episode page {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| Error::Unexpected(format!("episode page fetch failed: {e}")))?;
        if response.status().is_redirection() {
            return Err(Error::ShowNotFound(filename.show.clone()));
        }
        if !response.status().is_success() {
            return Err(Error::Unexpected(format!(
                "Addic7ed answered HTTP {} for {url}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| Error::Unexpected(format!("episode page fetch failed: {e}")))?;
        parse_episode_page(&body, filename, lang.name)
    }

    /// Fetch a chosen subtitle's payload. The site refuses downloads without
    /// a Referer of the episode page, and answers with an HTML page instead
    /// of the file once the daily quota is reached.
    pub fn download(&self, url: &str, referer: &str) -> Result<Vec<u8>> {
        debug!("downloading subtitle {url}");
        let response = self
            .http
            .get(url)
            .header("Referer", referer)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Download(e.to_string()))?;

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);

        let payload = response
            .bytes()
            .map_err(|e| Error::Download(e.to_string()))?
            .to_vec();
        if is_html || payload.starts_with(b"<!DOCTYPE") || payload.starts_with(b"<html") {
            return Err(Error::Download(
                "Addic7ed sent an HTML page instead of a subtitle (daily download limit reached?)"
                    .to_string(),
            ));
        }
        Ok(payload)
    }
}

fn parse_episode_page(body: &str, filename: &Filename, language: &str) -> Result<Vec<Subtitle>> {
    let document = Html::parse_document(body);

    let table_sel = selector("div#container95m table.tabel95 table.tabel95")?;
    let title_sel = selector("td.NewsTitle")?;
    let language_sel = selector("td.language")?;
    let link_sel = selector("a.buttonDownload")?;
    let date_sel = selector("td.newsDate")?;
    let anchor_sel = selector("a")?;

    if body.contains("Couldn't find any results") {
        return Err(Error::EpisodeNotFound {
            show: filename.show.clone(),
            season: filename.season,
            episode: filename.episode,
        });
    }

    let tables: Vec<ElementRef> = document.select(&table_sel).collect();
    if tables.is_empty() {
        // A recognizable episode page with no subtitle blocks is an empty
        // pool (no subtitle uploaded yet); an unrecognizable page is a
        // layout we cannot read.
        if body.contains("tabel95") {
            return Ok(Vec::new());
        }
        return Err(Error::Parsing(
            "no subtitle block found on the episode page".to_string(),
        ));
    }

    let mut subtitles = Vec::new();
    for table in tables {
        let raw_version = table
            .select(&title_sel)
            .next()
            .map(|cell| cell_text(&cell))
            .ok_or_else(|| Error::Parsing("subtitle block without a version cell".to_string()))?;
        // The cell reads "Version LOL, 0.00 MBs"; keep only the label.
        let raw_version = version_cell()
            .captures(&raw_version)
            .map(|caps| caps[1].to_string())
            .unwrap_or(raw_version);

        let news_date = table.select(&date_sel).next();
        let downloads = news_date.map(|cell| cell_text(&cell)).and_then(|text| {
            download_count()
                .captures(&text)
                .map(|caps| caps[1].to_string())
        });
        let via = news_date
            .and_then(|cell| cell.select(&anchor_sel).next())
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.to_string());

        // One version block lists one row per language, each with its own
        // status cell and download button.
        for language_cell in table.select(&language_sel) {
            let row_language = cell_text(&language_cell);
            if !row_language.eq_ignore_ascii_case(language) {
                continue;
            }
            let status = next_cell(&language_cell)
                .map(|cell| cell_text(&cell))
                .ok_or_else(|| Error::Parsing("language row without a status cell".to_string()))?;
            let row = ElementRef::wrap(language_cell.parent().ok_or_else(|| {
                Error::Parsing("language cell outside of a table row".to_string())
            })?)
            .ok_or_else(|| Error::Parsing("language cell outside of a table row".to_string()))?;
            let Some(href) = row
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                // Incomplete subtitles sometimes have no download button yet.
                continue;
            };

            subtitles.push(Subtitle::new(RawSubtitle {
                version: Some(raw_version.clone()),
                language: row_language,
                status,
                url: format!("{SITE_URL}{href}"),
                via: via.clone(),
                downloads: downloads.clone(),
            }));
        }
    }

    debug!(
        "scraped {} candidate(s) for {} in {}",
        subtitles.len(),
        filename,
        language
    );
    Ok(subtitles)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parsing(format!("bad selector '{css}': {e}")))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn next_cell<'a>(cell: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    cell.next_siblings().find_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn episode_page(rows: &str) -> String {
        format!(
            r#"<html><body><div id="container95m">
            <table class="tabel95"><tr><td>
            {rows}
            </td></tr></table>
            </div></body></html>"#
        )
    }

    fn version_block(version: &str, downloads: u64, via: &str, rows: &str) -> String {
        let via_anchor = if via.is_empty() {
            String::new()
        } else {
            format!(r#"<a href="{via}">source</a>"#)
        };
        format!(
            r#"<table class="tabel95" width="100%">
            <tr><td class="NewsTitle">Version {version}, 0.00 MBs</td></tr>
            {rows}
            <tr><td class="newsDate">{downloads} Downloads {via_anchor}</td></tr>
            </table>"#
        )
    }

    fn language_row(language: &str, status: &str, href: &str) -> String {
        let button = if href.is_empty() {
            String::new()
        } else {
            format!(r#"<td><a class="buttonDownload" href="{href}">Download</a></td>"#)
        };
        format!(r#"<tr><td class="language">{language}</td><td>{status}</td>{button}</tr>"#)
    }

    fn filename() -> Filename {
        Filename::parse(Path::new("Show.S01E02.HDTV.x264-LOL.mkv")).unwrap()
    }

    #[test]
    fn test_parse_single_candidate() {
        let page = episode_page(&version_block(
            "720p.HDTV.x264-LOL",
            42,
            "",
            &language_row("French", "Completed", "/original/12345/8"),
        ));
        let subs = parse_episode_page(&page, &filename(), "French").unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].version, "LOL");
        assert_eq!(subs[0].language, "French");
        assert_eq!(subs[0].downloads, 42);
        assert_eq!(subs[0].url, "http://www.addic7ed.com/original/12345/8");
        assert!(subs[0].via.is_none());
        assert!(subs[0].is_completed());
    }

    #[test]
    fn test_parse_keeps_only_requested_language() {
        let rows = [
            language_row("French", "Completed", "/original/1/8"),
            language_row("English", "Completed", "/original/1/1"),
        ]
        .join("\n");
        let page = episode_page(&version_block("LOL", 10, "", &rows));
        let subs = parse_episode_page(&page, &filename(), "French").unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].language, "French");
    }

    #[test]
    fn test_parse_via_and_incomplete_status() {
        let page = episode_page(&version_block(
            "DIMENSION",
            3,
            "http://addic7ed.com",
            &language_row("French", "80.50% Completed", "/original/2/8"),
        ));
        let subs = parse_episode_page(&page, &filename(), "French").unwrap();
        assert_eq!(subs[0].via.as_deref(), Some("http://addic7ed.com"));
        assert!(subs[0].is_featured());
        assert!(!subs[0].is_completed());
    }

    #[test]
    fn test_parse_skips_rows_without_download_button() {
        let page = episode_page(&version_block(
            "LOL",
            0,
            "",
            &language_row("French", "20% Completed", ""),
        ));
        let subs = parse_episode_page(&page, &filename(), "French").unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_parse_page_without_blocks_is_empty_pool() {
        let page = episode_page("");
        let subs = parse_episode_page(&page, &filename(), "French").unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_parse_no_results_page_is_episode_not_found() {
        let page = "<html><body>Couldn't find any results</body></html>";
        assert!(matches!(
            parse_episode_page(page, &filename(), "French"),
            Err(Error::EpisodeNotFound { .. })
        ));
    }

    #[test]
    fn test_parse_unrecognized_page_is_parsing_error() {
        let page = "<html><body><p>maintenance</p></body></html>";
        assert!(matches!(
            parse_episode_page(page, &filename(), "French"),
            Err(Error::Parsing(_))
        ));
    }

    #[test]
    fn test_episode_url() {
        let client = Client::new().unwrap();
        assert_eq!(
            client.episode_url(&filename(), 8),
            "http://www.addic7ed.com/serie/Show/1/2/8"
        );
    }
}
