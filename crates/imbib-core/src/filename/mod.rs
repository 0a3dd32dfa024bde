//! PDF filename generation with human-readable names

use crate::domain::Publication;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).unwrap();
    static ref MULTIPLE_SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref MULTIPLE_UNDERSCORES: Regex = Regex::new(r"_+").unwrap();
}

/// Options for filename generation
#[derive(uniffi::Record, Clone, Debug)]
pub struct FilenameOptions {
    pub max_length: u32,
    pub include_year: bool,
    pub title_words: u32,
    pub separator: String,
}

impl Default for FilenameOptions {
    fn default() -> Self {
        Self {
            max_length: 100,
            include_year: true,
            title_words: 3,
            separator: "_".to_string(),
        }
    }
}

pub(crate) fn default_filename_options_internal() -> FilenameOptions {
    FilenameOptions::default()
}

#[cfg(feature = "native")]
#[uniffi::export]
pub fn default_filename_options() -> FilenameOptions {
    default_filename_options_internal()
}

pub(crate) fn generate_pdf_filename_internal(
    publication: &Publication,
    options: &FilenameOptions,
) -> String {
    let mut parts = Vec::new();

    // Author (first author's family name)
    let author = publication
        .authors
        .first()
        .map(|a| sanitize_component(&a.family_name))
        .unwrap_or_else(|| "Unknown".to_string());
    parts.push(author);

    // Year
    if options.include_year {
        if let Some(year) = publication.year {
            parts.push(year.to_string());
        }
    }

    // Title (first N significant words)
    let title = extract_title_words(&publication.title, options.title_words as usize);
    if !title.is_empty() {
        parts.push(title);
    }

    let filename = parts.join(&options.separator);
    let truncated = truncate_filename(&filename, options.max_length as usize);

    format!("{}.pdf", truncated)
}

#[cfg(feature = "native")]
#[uniffi::export]
pub fn generate_pdf_filename(publication: &Publication, options: &FilenameOptions) -> String {
    generate_pdf_filename_internal(publication, options)
}

pub(crate) fn generate_pdf_filename_from_metadata_internal(
    title: String,
    authors: Vec<String>,
    year: Option<i32>,
    options: &FilenameOptions,
) -> String {
    let mut parts = Vec::new();

    // Author
    let author = authors
        .first()
        .map(|a| {
            // Extract family name (last word or before comma)
            if let Some(pos) = a.find(',') {
                sanitize_component(&a[..pos])
            } else {
                a.split_whitespace()
                    .last()
                    .map(sanitize_component)
                    .unwrap_or_else(|| "Unknown".to_string())
            }
        })
        .unwrap_or_else(|| "Unknown".to_string());
    parts.push(author);

    // Year
    if options.include_year {
        if let Some(y) = year {
            parts.push(y.to_string());
        }
    }

    // Title
    let title_part = extract_title_words(&title, options.title_words as usize);
    if !title_part.is_empty() {
        parts.push(title_part);
    }

    let filename = parts.join(&options.separator);
    let truncated = truncate_filename(&filename, options.max_length as usize);

    format!("{}.pdf", truncated)
}

#[cfg(feature = "native")]
#[uniffi::export]
pub fn generate_pdf_filename_from_metadata(
    title: String,
    authors: Vec<String>,
    year: Option<i32>,
    options: &FilenameOptions,
) -> String {
    generate_pdf_filename_from_metadata_internal(title, authors, year, options)
}

fn sanitize_component(input: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(input, "");
    let normalized = MULTIPLE_SPACES.replace_all(&cleaned, " ");
    let trimmed = normalized.trim();

    // Convert spaces to underscores and remove leading/trailing underscores
    let result: String = trimmed
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();

    MULTIPLE_UNDERSCORES
        .replace_all(&result, "_")
        .trim_matches('_')
        .to_string()
}

fn extract_title_words(title: &str, max_words: usize) -> String {
    // Skip common articles and prepositions at the start
    let skip_words = [
        "a", "an", "the", "on", "in", "of", "for", "to", "and", "with", "by", "from", "at",
    ];

    let words: Vec<&str> = title
        .split_whitespace()
        .filter(|w| w.len() > 1) // Skip single chars
        .filter(|w| !skip_words.contains(&w.to_lowercase().as_str()))
        .take(max_words)
        .collect();

    words
        .iter()
        .map(|w| sanitize_component(w))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn truncate_filename(filename: &str, max_length: usize) -> String {
    if filename.len() <= max_length {
        filename.to_string()
    } else {
        // Truncate at word boundary if possible
        let truncated = &filename[..max_length];
        if let Some(pos) = truncated.rfind('_') {
            truncated[..pos].to_string()
        } else {
            truncated.to_string()
        }
    }
}
