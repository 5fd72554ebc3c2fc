//! Heuristic title/description/icon derivation for plain markdown bodies.
//!
//! # Responsibility
//! - Derive user-facing metadata when a content source only supplies text.
//!
//! # Invariants
//! - Every function is pure, total and deterministic.
//! - Derived descriptions never exceed `DESCRIPTION_MAX_CHARS` characters
//!   plus the ellipsis suffix.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder title when no level-one heading exists.
pub const UNTITLED: &str = "untitled";
/// Description used when neither heuristic pass finds a candidate.
pub const GENERIC_DESCRIPTION: &str = "Markdownで作成された記事";
/// Icon used when no keyword rule or leading pictograph applies.
pub const DEFAULT_ICON: &str = "📝";
/// Phrase identifying the section whose first sentence becomes the description.
pub const DESCRIPTION_MARKER: &str = "中心的な主張";

const DESCRIPTION_MAX_CHARS: usize = 150;
const FALLBACK_MIN_CHARS: usize = 20;
const SENTENCE_TERMINATOR: char = '。';
const ELLIPSIS: &str = "...";

/// Keyword rules checked in order; first match wins.
const ICON_RULES: &[(&[&str], &str)] = &[
    (
        &[
            "chatgpt", "claude", "gemini", "openai", "copilot", "llm", "生成ai", "人工知能",
        ],
        "🤖",
    ),
    (&["github"], "🐙"),
    (&["docker", "kubernetes"], "🐳"),
    (&["python"], "🐍"),
    (&["rust"], "🦀"),
    (&["golang", "go言語", "go"], "🐹"),
];

/// CJK punctuation, kana, ideographs and full-width forms.
const CJK_RANGES: &[(u32, u32)] = &[
    (0x3000, 0x30FF),
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xF900, 0xFAFF),
    (0xFF00, 0xFFEF),
];

/// Code point ranges treated as pictographs for icon reuse.
const PICTOGRAPH_RANGES: &[(u32, u32)] = &[(0x1F300, 0x1FAFF), (0x2600, 0x27BF)];

static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{1,3}|_{2,3}|~~").expect("valid emphasis regex"));
static ORDERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s").expect("valid ordered list regex"));

/// Returns the text of the first `# ` heading, or [`UNTITLED`].
pub fn derive_title(body: &str) -> String {
    body.lines()
        .filter_map(|line| line.trim_start().strip_prefix("# "))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Derives a short description.
///
/// Rules:
/// - Preferred: first sentence of the section introduced by a line
///   containing [`DESCRIPTION_MARKER`], emphasis stripped.
/// - Fallback: first prose line longer than 20 characters.
/// - Otherwise [`GENERIC_DESCRIPTION`].
pub fn derive_description(body: &str) -> String {
    marker_section_sentence(body)
        .or_else(|| first_prose_line(body))
        .unwrap_or_else(|| GENERIC_DESCRIPTION.to_string())
}

/// Picks a display glyph for `title`.
///
/// Keyword rules are matched case-insensitively as substrings. When none
/// match, a leading pictograph in the title is reused.
pub fn derive_icon(title: &str) -> String {
    let lowered = title.to_lowercase();
    for (keywords, icon) in ICON_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return (*icon).to_string();
        }
    }

    match title.trim_start().chars().next() {
        Some(first) if is_pictograph(first) => first.to_string(),
        _ => DEFAULT_ICON.to_string(),
    }
}

fn marker_section_sentence(body: &str) -> Option<String> {
    let mut lines = body
        .lines()
        .map(str::trim)
        .skip_while(|line| !(is_heading(line) && line.contains(DESCRIPTION_MARKER)));
    lines.next()?;

    let section = lines
        .take_while(|line| !is_heading(line))
        .filter(|line| !line.is_empty())
        .map(strip_emphasis)
        .fold(String::new(), |mut joined, line| {
            let line = line.trim();
            if needs_space(&joined, line) {
                joined.push(' ');
            }
            joined.push_str(line);
            joined
        });
    let section = section.trim();
    if section.is_empty() {
        return None;
    }

    let sentence = match section.split_once(SENTENCE_TERMINATOR) {
        Some((head, _)) => format!("{}{SENTENCE_TERMINATOR}", head.trim()),
        None => section.to_string(),
    };
    Some(truncate_chars(&sentence, DESCRIPTION_MAX_CHARS))
}

fn first_prose_line(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !is_structural(line))
        .map(strip_emphasis)
        .map(|line| line.trim().to_string())
        .find(|line| line.chars().count() > FALLBACK_MIN_CHARS)
        .map(|line| truncate_chars(&line, DESCRIPTION_MAX_CHARS))
}

/// Wrapped lines join without a gap only across CJK text.
fn needs_space(joined: &str, next: &str) -> bool {
    match (joined.chars().next_back(), next.chars().next()) {
        (Some(last), Some(first)) => !is_cjk(last) && !is_cjk(first),
        _ => false,
    }
}

fn is_cjk(c: char) -> bool {
    let code = u32::from(c);
    CJK_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&code))
}

fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}

/// Headings, images, table rows, horizontal rules and list items.
fn is_structural(line: &str) -> bool {
    is_heading(line)
        || line.starts_with("![")
        || line.starts_with('|')
        || is_horizontal_rule(line)
        || line.starts_with("- ")
        || line.starts_with("* ")
        || line.starts_with("+ ")
        || ORDERED_ITEM_RE.is_match(line)
}

fn is_horizontal_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = compact.chars();
    match chars.next() {
        Some(first) if matches!(first, '-' | '*' | '_') => {
            compact.chars().count() >= 3 && chars.all(|c| c == first)
        }
        _ => false,
    }
}

fn strip_emphasis(line: &str) -> String {
    EMPHASIS_RE.replace_all(line, "").into_owned()
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars).collect::<String>();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn is_pictograph(c: char) -> bool {
    let code = u32::from(c);
    PICTOGRAPH_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&code))
}
