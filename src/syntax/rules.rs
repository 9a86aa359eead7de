//! Syntax rule records and the registry that selects them by file name
//!
//! A rule record describes one language: which files it applies to, its
//! keywords, comment markers and which literal classes get highlighted.
//! Records are read from JSON files; malformed fields are treated as absent.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use super::highlight::Highlight;

/// Which literal classes a language highlights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
}

impl HighlightFlags {
    pub const NUMBERS: u64 = 1 << 0;
    pub const STRINGS: u64 = 1 << 1;

    pub const fn from_bits(bits: u64) -> Self {
        Self {
            numbers: bits & Self::NUMBERS != 0,
            strings: bits & Self::STRINGS != 0,
        }
    }

    pub const fn all() -> Self {
        Self {
            numbers: true,
            strings: true,
        }
    }
}

/// A keyword with the class it is highlighted as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: Vec<u8>,
    pub class: Highlight,
}

impl Keyword {
    /// Parse a keyword entry; a trailing `|` marks the secondary class
    fn parse(entry: &str) -> Option<Self> {
        let (text, class) = match entry.strip_suffix('|') {
            Some(stripped) => (stripped, Highlight::Keyword2),
            None => (entry, Highlight::Keyword1),
        };
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.as_bytes().to_vec(),
            class,
        })
    }
}

/// Highlighting rules for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxRules {
    pub language: String,
    pub filematch: Vec<String>,
    /// Sorted longest first so the first hit is the longest match
    keywords: Vec<Keyword>,
    pub singleline_comment_start: Option<String>,
    pub multiline_comment_start: Option<String>,
    pub multiline_comment_end: Option<String>,
    pub flags: HighlightFlags,
}

impl SyntaxRules {
    pub fn new(language: &str, filematch: &[&str], keywords: &[&str]) -> Self {
        let mut rules = Self {
            language: language.to_string(),
            filematch: filematch.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        };
        rules.set_keywords(keywords.iter().copied());
        rules
    }

    pub fn with_comments(
        mut self,
        single: Option<&str>,
        multi_start: Option<&str>,
        multi_end: Option<&str>,
    ) -> Self {
        self.singleline_comment_start = single.map(str::to_string);
        self.multiline_comment_start = multi_start.map(str::to_string);
        self.multiline_comment_end = multi_end.map(str::to_string);
        self
    }

    pub fn with_flags(mut self, flags: HighlightFlags) -> Self {
        self.flags = flags;
        self
    }

    fn set_keywords<'a>(&mut self, entries: impl Iterator<Item = &'a str>) {
        self.keywords = entries.filter_map(Keyword::parse).collect();
        self.keywords.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// Longest keyword starting at `at` that is followed by a separator
    pub fn keyword_at(&self, line: &[u8], at: usize) -> Option<&Keyword> {
        let rest = &line[at..];
        self.keywords.iter().find(|kw| {
            rest.starts_with(&kw.text)
                && rest
                    .get(kw.text.len())
                    .map_or(true, |&next| crate::util::is_separator(next))
        })
    }

    /// Both block comment markers, if the language has block comments
    pub fn block_comment(&self) -> Option<(&[u8], &[u8])> {
        match (&self.multiline_comment_start, &self.multiline_comment_end) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
                Some((start.as_bytes(), end.as_bytes()))
            }
            _ => None,
        }
    }

    /// Single-line comment marker, if any
    pub fn line_comment(&self) -> Option<&[u8]> {
        self.singleline_comment_start
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::as_bytes)
    }

    /// Parse a rule record from JSON.
    ///
    /// Fields with unexpected types are ignored. A record without a
    /// `filematch` array is rejected since it could never be selected.
    pub fn from_json(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source).context("invalid syntax rule JSON")?;

        let filematch = value
            .get("filematch")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("syntax rule has no filematch array"))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        let string_field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        let mut rules = Self {
            language: string_field("language").unwrap_or_default(),
            filematch,
            keywords: Vec::new(),
            singleline_comment_start: string_field("singleline_comment_start"),
            multiline_comment_start: string_field("multiline_comment_start"),
            multiline_comment_end: string_field("multiline_comment_end"),
            flags: HighlightFlags::from_bits(
                value.get("flags").and_then(Value::as_u64).unwrap_or(0),
            ),
        };

        if let Some(keywords) = value.get("keywords").and_then(Value::as_array) {
            rules.set_keywords(keywords.iter().filter_map(Value::as_str));
        }

        Ok(rules)
    }

    /// Check whether this language applies to `file_name`.
    ///
    /// Patterns starting with `.` must equal the extension (dot included);
    /// other patterns match anywhere in the name.
    pub fn matches(&self, file_name: &str) -> bool {
        let ext = file_name.rfind('.').map(|i| &file_name[i..]);
        self.filematch.iter().any(|pattern| {
            if pattern.starts_with('.') {
                ext == Some(pattern.as_str())
            } else {
                !pattern.is_empty() && file_name.contains(pattern.as_str())
            }
        })
    }

    /// Built-in rules for C, used when no rule directory provides one
    pub fn c() -> Self {
        Self::new(
            "c",
            &[".c", ".h", ".cpp"],
            &[
                "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
                "union", "typedef", "static", "enum", "class", "case", "int|", "long|", "double|",
                "float|", "char|", "unsigned|", "signed|", "void|",
            ],
        )
        .with_comments(Some("//"), Some("/*"), Some("*/"))
        .with_flags(HighlightFlags::all())
    }
}

/// Ordered collection of rule records; earlier entries win
#[derive(Debug, Clone, Default)]
pub struct SyntaxRegistry {
    rules: Vec<Arc<SyntaxRules>>,
}

impl SyntaxRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry containing only the built-in rules
    pub fn with_builtin() -> Self {
        Self {
            rules: vec![Arc::new(SyntaxRules::c())],
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add rules with priority over everything already registered
    pub fn register(&mut self, rules: SyntaxRules) {
        self.rules.insert(0, Arc::new(rules));
    }

    /// Load every rule file in `dir`, returning how many were accepted.
    ///
    /// Hidden files and files that fail to read or parse are skipped.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("No syntax directory at {}: {}", dir.display(), e);
                return 0;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| !n.starts_with('.'))
                    .unwrap_or(false)
            })
            .collect();
        // Directory order is unspecified; sort for deterministic priority
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            let parsed = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))
                .and_then(|source| SyntaxRules::from_json(&source));
            match parsed {
                Ok(rules) => {
                    tracing::debug!(
                        "Loaded syntax rules '{}' from {}",
                        rules.language,
                        path.display()
                    );
                    loaded.push(Arc::new(rules));
                }
                Err(e) => tracing::warn!("Skipping syntax file {}: {:#}", path.display(), e),
            }
        }

        let count = loaded.len();
        loaded.append(&mut self.rules);
        self.rules = loaded;
        count
    }

    /// Pick the rules for a file path by its file name
    pub fn select(&self, path: &Path) -> Option<Arc<SyntaxRules>> {
        let name = path.file_name()?.to_str()?;
        self.rules.iter().find(|rules| rules.matches(name)).cloned()
    }
}
