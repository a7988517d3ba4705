use crate::shared::Result;
use std::sync::atomic::{AtomicBool, Ordering};

/// Maximum number of kind patterns to prevent DoS attacks
const MAX_KIND_PATTERNS: usize = 64;

/// Maximum length of a single kind pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// AssetKindFilter - decides which assets are excluded from orphan reports
///
/// Patterns are matched against an asset's display path and support the
/// '*' wildcard (zero or more characters), e.g. `*.cs`, `Assets/Editor/*`.
/// Matching is case-sensitive.
#[derive(Debug)]
pub struct AssetKindFilter {
    patterns: Vec<KindPattern>,
}

impl AssetKindFilter {
    /// Creates a new AssetKindFilter from raw pattern strings
    ///
    /// # Errors
    /// - Too many patterns (> MAX_KIND_PATTERNS)
    /// - Invalid pattern format (empty, too long, bad characters, only wildcards)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_KIND_PATTERNS {
            anyhow::bail!(
                "Too many exclude patterns: {} (maximum: {})",
                patterns.len(),
                MAX_KIND_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(KindPattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Checks if a display path matches any exclusion pattern
    pub fn matches(&self, display_path: &str) -> bool {
        // Evaluate every pattern so unmatched-pattern tracking stays accurate.
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(display_path) || hit)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns patterns that never matched any path checked so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.load(Ordering::Relaxed))
            .map(|p| p.original.clone())
            .collect()
    }
}

/// A single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct KindPattern {
    original: String,
    matcher: PatternMatcher,
    matched: AtomicBool,
}

impl KindPattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = compile_pattern(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: AtomicBool::new(false),
        })
    }

    fn matches(&self, display_path: &str) -> bool {
        let is_match = self.matcher.matches(display_path);
        if is_match {
            self.matched.store(true, Ordering::Relaxed);
        }
        is_match
    }
}

/// Pattern matcher types for efficient matching
#[derive(Debug)]
enum PatternMatcher {
    /// Exact match: "Assets/readme.txt"
    Exact(String),
    /// Leading wildcard: "*.cs"
    EndsWith(String),
    /// Trailing wildcard: "Assets/Editor/*"
    StartsWith(String),
    /// Surrounding wildcards: "*Generated*"
    Contains(String),
    /// General case: "Assets/*/Shaders/*.shader"
    Segments {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => path == s,
            PatternMatcher::EndsWith(suffix) => path.ends_with(suffix),
            PatternMatcher::StartsWith(prefix) => path.starts_with(prefix),
            PatternMatcher::Contains(middle) => path.contains(middle),
            PatternMatcher::Segments {
                parts,
                anchored_start,
                anchored_end,
            } => segments_match(path, parts, *anchored_start, *anchored_end),
        }
    }
}

/// Matches the literal segments of a wildcard pattern in order
fn segments_match(path: &str, parts: &[String], anchored_start: bool, anchored_end: bool) -> bool {
    let mut rest = path;
    let last = parts.len().saturating_sub(1);

    for (i, part) in parts.iter().enumerate() {
        if i == 0 && anchored_start {
            match rest.strip_prefix(part.as_str()) {
                Some(tail) => rest = tail,
                None => return false,
            }
            continue;
        }

        if i == last && anchored_end {
            return rest.len() >= part.len() && rest.ends_with(part.as_str());
        }

        match rest.find(part.as_str()) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    !anchored_end || rest.is_empty() || parts.is_empty()
}

/// Validates a pattern string
fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        anyhow::bail!("Exclude pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclude pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| c.is_control()) {
        anyhow::bail!(
            "Exclude pattern contains invalid character {:?} in pattern '{}'",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclude pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

/// Compiles a pattern string into an optimized matcher
fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();
    let starts = pattern.starts_with('*');
    let ends = pattern.ends_with('*');

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 if starts => PatternMatcher::EndsWith(pattern[1..].to_string()),
        1 if ends => PatternMatcher::StartsWith(pattern[..pattern.len() - 1].to_string()),
        2 if starts && ends && pattern.len() > 2 => {
            PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string())
        }
        _ => PatternMatcher::Segments {
            parts: pattern
                .split('*')
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
            anchored_start: !starts,
            anchored_end: !ends,
        },
    }
}
