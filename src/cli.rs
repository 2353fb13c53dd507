use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "addic7ed-dl")]
#[command(version)]
#[command(about = "Download the best matching Addic7ed subtitle for TV episode files")]
pub struct Cli {
    /// Video files to find subtitles for
    #[arg(required_unless_present = "list_languages")]
    pub filenames: Vec<PathBuf>,

    /// Language code to look subtitles for
    #[arg(short, long)]
    pub language: Option<String>,

    /// Display all available subtitles instead of downloading the best one
    #[arg(short = 'a', long = "all-subtitles")]
    pub all: bool,

    /// Do not download the subtitle
    #[arg(short = 'n', long = "do-not-download")]
    pub no_download: bool,

    /// Run verbosely
    #[arg(short, long)]
    pub verbose: bool,

    /// Run without output (cron-mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// List all available languages and exit
    #[arg(short = 'L', long = "list-languages")]
    pub list_languages: bool,
}
