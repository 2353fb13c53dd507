mod addic7ed;
mod cli;
mod config;
mod episode;
mod error;
mod filename;
mod languages;
mod select;
mod subtitle;
mod version;

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use addic7ed::Client;
use cli::Cli;
use config::Config;
use episode::Episode;
use error::Error;
use version::COMPATIBILITY_720P;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_languages {
        languages::print_all();
        return Ok(());
    }

    let config = Config::load()?;
    let language = cli
        .language
        .clone()
        .or(config.language)
        .unwrap_or_else(|| "fr".to_string());

    let client = Client::new()?;
    let out = Output {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    for path in &cli.filenames {
        if !path.is_file() {
            out.warn(&format!(
                "Warning: {} does not exist or is not a regular file. Skipping.",
                path.display()
            ));
            continue;
        }

        match process_file(path, &client, &language, &cli, &out) {
            Ok(()) => {}
            // An unsupported language can never succeed for the remaining
            // files either, so it aborts the whole batch.
            Err(e @ Error::LanguageNotSupported(_)) => {
                out.warn(&format!("{e}. Exiting."));
                break;
            }
            Err(e) => {
                out.warn(&format!("{e}. Skipping."));
            }
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    client: &Client,
    language: &str,
    cli: &Cli,
    out: &Output,
) -> error::Result<()> {
    let mut episode = Episode::new(path)?;
    out.detail(&format!(
        "Searching subtitles for {}",
        episode.filename.basename()
    ));
    out.detail(&format!("  {}", episode.filename));

    if cli.all || cli.verbose {
        let subtitles = episode.subtitles(client, language)?;
        out.say("Available subtitles:");
        for sub in subtitles {
            out.say(&format!("  {sub}"));
        }
        if cli.all {
            return Ok(());
        }
    }

    // Resolved from the cached pool; at most one scrape happened above.
    episode.best_subtitle(client, language, &COMPATIBILITY_720P)?;
    if cli.verbose {
        let best = episode.best_subtitle(client, language, &COMPATIBILITY_720P)?;
        out.detail("  Best subtitle:");
        out.detail(&format!("    {best}"));
    }

    if !cli.no_download {
        episode.download_best_subtitle(client, language, &COMPATIBILITY_720P)?;
        out.say(&format!(
            "New subtitle downloaded for {}.\nEnjoy your show :-)",
            path.display()
        ));
    }

    Ok(())
}

/// Presentation policy: quiet suppresses everything non-essential, verbose
/// adds detail lines and indents the rest under the per-file header.
struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    fn prefix(&self) -> &'static str {
        if self.verbose {
            "  "
        } else {
            ""
        }
    }

    fn say(&self, msg: &str) {
        if self.quiet {
            return;
        }
        for line in msg.lines() {
            println!("{}{line}", self.prefix());
        }
    }

    fn detail(&self, msg: &str) {
        if self.verbose && !self.quiet {
            println!("{msg}");
        }
    }

    fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        for line in msg.lines() {
            eprintln!("{}{line}", self.prefix());
        }
    }
}
