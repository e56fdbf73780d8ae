use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

/// Hard ceiling the messaging transport enforces per outbound message,
/// counted in characters.
pub const TELEGRAM_MAX_LENGTH: usize = 4096;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link pattern"));

/// Makes arbitrary text safe for the transport's Markdown dialect.
///
/// The repair ladder: truncate oversized input, close unbalanced markers,
/// rewrite malformed links, and only if the result still fails validation
/// fall back to escaping every marker. Already-valid input is returned
/// untouched, and the function is total: no input makes it fail, and a
/// second application is always a no-op.
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let working = if char_len(text) > TELEGRAM_MAX_LENGTH {
        truncate_with_repair(text)
    } else {
        text.to_string()
    };

    let candidate = rewrite_links(&repair(&working));

    if candidate == working && is_valid(&working) {
        return working;
    }
    if is_valid(&candidate) {
        debug!("outbound markdown repaired");
        return candidate;
    }

    warn!("markdown repair failed; degrading to escaped plain text");
    let mut escaped = escape_markdown(&working);
    if char_len(&escaped) > TELEGRAM_MAX_LENGTH {
        escaped = truncate_chars(&escaped, TELEGRAM_MAX_LENGTH - 3);
        escaped.push_str("...");
    }
    escaped
}

/// Escapes every marker the dialect assigns meaning to, including the
/// escape character itself, producing inert plain text.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for character in text.chars() {
        if matches!(character, '\\' | '*' | '_' | '~' | '`' | '[' | ']' | '(' | ')') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

/// Checks the three structural rules the transport enforces: balanced
/// markers, well-formed links, and the length ceiling.
pub fn is_valid(text: &str) -> bool {
    let counts = count_markers(text);
    counts.bold_pairs % 2 == 0
        && counts.italic_singles % 2 == 0
        && counts.backticks % 2 == 0
        && links_are_valid(text)
        && char_len(text) <= TELEGRAM_MAX_LENGTH
}

struct MarkerCounts {
    bold_pairs: usize,
    italic_singles: usize,
    backticks: usize,
}

/// Counts unescaped markers. A backslash hides the character after it;
/// `**` is consumed as one bold marker, a lone `*` as an italic one.
fn count_markers(text: &str) -> MarkerCounts {
    let chars: Vec<char> = text.chars().collect();
    let mut counts = MarkerCounts { bold_pairs: 0, italic_singles: 0, backticks: 0 };
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            '*' => {
                if chars.get(index + 1) == Some(&'*') {
                    counts.bold_pairs += 1;
                    index += 2;
                } else {
                    counts.italic_singles += 1;
                    index += 1;
                }
            }
            '`' => {
                counts.backticks += 1;
                index += 1;
            }
            _ => index += 1,
        }
    }
    counts
}

/// Appends closers for any marker left unbalanced, bold first, then code,
/// then italic.
fn repair(text: &str) -> String {
    let counts = count_markers(text);
    let mut repaired = text.to_string();
    if counts.bold_pairs % 2 == 1 {
        repaired.push_str("**");
    }
    if counts.backticks % 2 == 1 {
        repaired.push('`');
    }
    if counts.italic_singles % 2 == 1 {
        repaired.push('*');
    }
    repaired
}

/// Rewrites `[label](url)` pairs whose url fails validation into the
/// plain `label: url` form; valid links are kept byte for byte.
fn rewrite_links(text: &str) -> String {
    LINK_RE
        .replace_all(text, |captures: &regex::Captures<'_>| {
            let label = &captures[1];
            let url = captures[2].trim();
            if is_valid_url(url) {
                captures[0].to_string()
            } else {
                format!("{label}: {url}")
            }
        })
        .into_owned()
}

fn links_are_valid(text: &str) -> bool {
    LINK_RE.captures_iter(text).all(|captures| {
        !captures[1].is_empty() && is_valid_url(captures[2].trim())
    })
}

fn is_valid_url(url: &str) -> bool {
    let absolute = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    absolute || (url.starts_with('/') && url.len() > 1)
}

/// Cuts oversized text to leave room for an ellipsis, closing any marker
/// the cut left open. The closers may themselves overflow the budget, in
/// which case the tail is cut once more.
fn truncate_with_repair(text: &str) -> String {
    let truncated = truncate_chars(text, TELEGRAM_MAX_LENGTH - 3);
    let mut repaired = repair(&truncated);
    if char_len(&repaired) > TELEGRAM_MAX_LENGTH - 3 {
        repaired = truncate_chars(&repaired, TELEGRAM_MAX_LENGTH - 3);
    }
    repaired.push_str("...");
    repaired
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
