use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Cleans text pulled out of one PDF page.
///
/// Applies NFKC, rejoins words hyphenated across a line break, drops
/// control characters, collapses runs of spaces inside a line, and folds
/// consecutive blank lines into one. Line structure is otherwise kept
/// because lines are the paragraph unit for chunking.
pub fn sanitize_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut lines: Vec<String> = Vec::new();
    for line in de_hyphenated.lines() {
        let cleaned = clean_line(line);
        let is_blank = cleaned.is_empty();
        let prev_blank = lines.last().is_none_or(|l| l.is_empty());

        if is_blank && prev_blank {
            continue;
        }
        lines.push(cleaned);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

fn clean_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if !ch.is_control() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }

    out
}
