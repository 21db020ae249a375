//! Allow-list of translation target languages

/// Canonical language names accepted as a translation target.
///
/// Matching is exact and case-sensitive.
pub const SUPPORTED_LANGUAGES: [&str; 30] = [
    "English", "Spanish", "French", "German", "Italian",
    "Portuguese", "Chinese", "Japanese", "Korean", "Russian",
    "Arabic", "Hindi", "Dutch", "Swedish", "Norwegian",
    "Danish", "Finnish", "Polish", "Czech", "Hungarian",
    "Romanian", "Bulgarian", "Greek", "Turkish", "Hebrew",
    "Thai", "Vietnamese", "Indonesian", "Malay", "Filipino",
];

/// Read-only lookup over [`SUPPORTED_LANGUAGES`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageRegistry;

impl LanguageRegistry {
    /// Check whether `name` is an allowed target language
    pub fn is_supported(name: &str) -> bool {
        SUPPORTED_LANGUAGES.contains(&name)
    }

    /// Owned copy of the allow-list, in definition order
    pub fn supported_languages() -> Vec<String> {
        SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect()
    }
}
