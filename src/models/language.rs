//! Languages a project can be created with, and the runtime version each maps to.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub id: &'static str,
    pub version: &'static str,
    pub label: &'static str,
}

pub const LANGUAGES: [LanguageOption; 13] = [
    LanguageOption { id: "javascript", version: "20.3.0", label: "JavaScript" },
    LanguageOption { id: "typescript", version: "5.2.0", label: "TypeScript" },
    LanguageOption { id: "python", version: "3.12.2", label: "Python" },
    LanguageOption { id: "java", version: "20.0.1", label: "Java" },
    LanguageOption { id: "c", version: "6.12.0", label: "C" },
    LanguageOption { id: "cpp", version: "11.3.0", label: "C++" },
    LanguageOption { id: "csharp", version: "12.0", label: "C#" },
    LanguageOption { id: "go", version: "1.20.4", label: "Go" },
    LanguageOption { id: "rust", version: "1.69.0", label: "Rust" },
    LanguageOption { id: "dart", version: "3.1.0", label: "Dart" },
    LanguageOption { id: "kotlin", version: "1.8.20", label: "Kotlin" },
    LanguageOption { id: "swift", version: "5.8", label: "Swift" },
    LanguageOption { id: "ruby", version: "3.2.2", label: "Ruby" },
];

/// Matches either the id or the display label, ignoring ASCII case.
pub fn find_language(value: &str) -> Option<&'static LanguageOption> {
    let value = value.trim();
    LANGUAGES
        .iter()
        .find(|lang| lang.id.eq_ignore_ascii_case(value) || lang.label.eq_ignore_ascii_case(value))
}
