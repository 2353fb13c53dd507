use crate::error::{Error, Result};

/// One entry of the Addic7ed language table. The `id` is the numeric language
/// filter the site uses in episode page URLs.
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub id: u32,
}

/// Languages Addic7ed serves, keyed by ISO code. Curated from the site's
/// language filter; extending it is a data change, not a code change.
pub static LANGUAGES: &[Language] = &[
    Language { code: "ar", name: "Arabic", id: 38 },
    Language { code: "de", name: "German", id: 11 },
    Language { code: "el", name: "Greek", id: 27 },
    Language { code: "en", name: "English", id: 1 },
    Language { code: "es", name: "Spanish", id: 4 },
    Language { code: "fa", name: "Persian", id: 43 },
    Language { code: "fr", name: "French", id: 8 },
    Language { code: "he", name: "Hebrew", id: 23 },
    Language { code: "hu", name: "Hungarian", id: 20 },
    Language { code: "it", name: "Italian", id: 7 },
    Language { code: "nl", name: "Dutch", id: 17 },
    Language { code: "pl", name: "Polish", id: 21 },
    Language { code: "pt", name: "Portuguese", id: 10 },
    Language { code: "pt-br", name: "Brazilian Portuguese", id: 26 },
    Language { code: "ro", name: "Romanian", id: 13 },
    Language { code: "ru", name: "Russian", id: 19 },
    Language { code: "sv", name: "Swedish", id: 18 },
    Language { code: "tr", name: "Turkish", id: 16 },
];

pub fn lookup(code: &str) -> Result<&'static Language> {
    LANGUAGES
        .iter()
        .find(|lang| lang.code == code)
        .ok_or_else(|| Error::LanguageNotSupported(code.to_string()))
}

pub fn print_all() {
    println!("All available languages (with their corresponding ISO code):");
    for lang in LANGUAGES {
        println!("{}:\t{}", lang.code, lang.name);
    }
}
