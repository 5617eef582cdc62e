//! Lesson documents: the renderable unit shown in the lesson panel.
//!
//! Lessons are authored in a small line-oriented format:
//!
//! ````text
//! # Title
//! @summary One line shown under the title
//!
//! A paragraph of prose. Consecutive lines are joined
//! into one paragraph; a blank line ends it.
//!
//! ```jsx
//! const [count, setCount] = useState(0)
//! ```
//! ````

use crate::lesson::LessonKey;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+(.+?)\s*$").expect("title pattern is valid"));
static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@summary\s+(.+?)\s*$").expect("summary pattern is valid"));
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```\s*([A-Za-z0-9_+-]*)\s*$").expect("fence pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("lesson has no `# Title` line")]
    MissingTitle,
    #[error("code block opened on line {line} is never closed")]
    UnterminatedFence { line: usize },
}

/// One block of lesson content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Prose(String),
    Code { language: String, lines: Vec<String> },
}

/// A loaded lesson, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub key: LessonKey,
    pub title: String,
    pub summary: Option<String>,
    pub sections: Vec<Section>,
}

impl Lesson {
    /// Parse a lesson document for `key`.
    pub fn parse(key: LessonKey, source: &str) -> Result<Self, ParseError> {
        let mut lines = source.lines().enumerate().skip_while(|(_, l)| l.trim().is_empty());

        let title = match lines.next() {
            Some((_, line)) => match TITLE_RE.captures(line) {
                Some(cap) => cap[1].to_string(),
                None => return Err(ParseError::MissingTitle),
            },
            None => return Err(ParseError::MissingTitle),
        };

        let mut summary = None;
        let mut sections = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();
        // (opening line number, language, collected lines)
        let mut fence: Option<(usize, String, Vec<String>)> = None;

        for (idx, line) in lines {
            if let Some((_, language, code)) = fence.as_mut() {
                if line.trim_end() == "```" {
                    sections.push(Section::Code {
                        language: std::mem::take(language),
                        lines: std::mem::take(code),
                    });
                    fence = None;
                } else {
                    code.push(line.to_string());
                }
                continue;
            }

            if let Some(cap) = FENCE_RE.captures(line) {
                flush_paragraph(&mut paragraph, &mut sections);
                let language = match &cap[1] {
                    "" => "text".to_string(),
                    lang => lang.to_string(),
                };
                fence = Some((idx + 1, language, Vec::new()));
                continue;
            }

            if summary.is_none() && sections.is_empty() && paragraph.is_empty() {
                if let Some(cap) = SUMMARY_RE.captures(line) {
                    summary = Some(cap[1].to_string());
                    continue;
                }
            }

            if line.trim().is_empty() {
                flush_paragraph(&mut paragraph, &mut sections);
            } else {
                paragraph.push(line.trim());
            }
        }

        if let Some((line, _, _)) = fence {
            return Err(ParseError::UnterminatedFence { line });
        }
        flush_paragraph(&mut paragraph, &mut sections);

        Ok(Self {
            key,
            title,
            summary,
            sections,
        })
    }

    /// Plain-text rendering used by the `--open` command.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push('\n');
        if let Some(summary) = &self.summary {
            out.push_str(summary);
            out.push('\n');
        }
        for section in &self.sections {
            out.push('\n');
            match section {
                Section::Prose(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Section::Code { language, lines } => {
                    out.push_str(&format!("--- {} ---\n", language));
                    for line in lines {
                        out.push_str("    ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

fn flush_paragraph(paragraph: &mut Vec<&str>, sections: &mut Vec<Section>) {
    if !paragraph.is_empty() {
        sections.push(Section::Prose(paragraph.join(" ")));
        paragraph.clear();
    }
}
