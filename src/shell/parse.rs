/// Straight and typographic quotes dropped from commit messages.
const QUOTES: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Splits on spaces. There is no quoting; runs of spaces do not produce empty tokens.
pub(super) fn tokenize(line: &str) -> Vec<&str> {
    line.split(' ').filter(|t| !t.is_empty()).collect()
}

pub(super) fn commit_message(tokens: &[&str]) -> String {
    tokens
        .join(" ")
        .chars()
        .filter(|c| !QUOTES.contains(c))
        .collect()
}
