use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
    Error,
}

/// Presentation category of an output line. Never consulted by the interpreter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineTag {
    Staged,
    Modified,
    Untracked,
    Deleted,
    CommitHeader,
    Author,
    Date,
    Message,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub kind: LineKind,
    pub text: String,
    pub timestamp: OffsetDateTime,
    pub tag: Option<LineTag>,
}

impl ScrollbackLine {
    /// Wall-clock time of the line as `HH:MM:SS`.
    pub fn clock(&self) -> String {
        self.timestamp
            .format(clock_format())
            .unwrap_or_else(|_| "--:--:--".to_string())
    }
}

fn clock_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[hour]:[minute]:[second]").unwrap_or_default()
    })
}

/// Append-only transcript; only `clear` ever shrinks it.
#[derive(Debug, Default)]
pub struct Scrollback {
    lines: Vec<ScrollbackLine>,
}

impl Scrollback {
    pub fn push(&mut self, kind: LineKind, text: impl Into<String>, tag: Option<LineTag>) {
        self.lines.push(ScrollbackLine {
            kind,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            tag,
        });
    }

    pub fn lines(&self) -> &[ScrollbackLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
