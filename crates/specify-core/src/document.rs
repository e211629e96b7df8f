//! Markdown as an ordered list of sections.
//!
//! Documents are parsed into a preamble plus one [`Section`] per ATX heading,
//! edited through section-level operations and serialized back to text only
//! when written. Lines inside fenced code blocks never start a section, so a
//! `# comment` in a shell snippet cannot be mistaken for a marker.

use regex::Regex;
use std::fmt;

/// Tracks whether the current line is inside a ``` or ~~~ fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed one line; returns true when the line is fenced content or a fence
    /// delimiter.
    pub(crate) fn step(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~');
        let run = marker.map(|m| trimmed.chars().take_while(|c| *c == m).count());
        match (self.open, marker, run) {
            (None, Some(m), Some(n)) if n >= 3 => {
                self.open = Some((m, n));
                true
            }
            (Some((m, n)), Some(c), Some(len))
                if c == m && len >= n && trimmed[len..].trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _, _) => true,
            _ => false,
        }
    }
}

/// Parse `line` as an ATX heading, returning its level and title.
fn parse_heading(line: &str) -> Option<(usize, String)> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let level = rest.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let after = &rest[level..];
    if !after.is_empty() && !after.starts_with(' ') && !after.starts_with('\t') {
        return None;
    }
    let title = after.trim().trim_end_matches('#').trim_end().to_string();
    Some((level, title))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: usize,
    pub title: String,
    heading: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    /// Insert `entry` as the first content line under the heading, keeping a
    /// blank line between the heading and the entry.
    pub fn prepend_entry(&mut self, entry: &str) {
        match self.lines.iter().position(|l| !l.trim().is_empty()) {
            Some(0) => {
                self.lines.insert(0, entry.to_string());
                self.lines.insert(0, String::new());
            }
            Some(i) => self.lines.insert(i, entry.to_string()),
            None => {
                self.lines = vec![String::new(), entry.to_string(), String::new()];
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    preamble: Vec<String>,
    sections: Vec<Section>,
    trailing_newline: bool,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let mut doc = Document {
            trailing_newline,
            ..Document::default()
        };
        if text.is_empty() {
            return doc;
        }

        let mut fence = FenceTracker::default();
        for line in body.split('\n') {
            let fenced = fence.step(line);
            if !fenced {
                if let Some((level, title)) = parse_heading(line) {
                    doc.sections.push(Section {
                        level,
                        title,
                        heading: line.to_string(),
                        lines: Vec::new(),
                    });
                    continue;
                }
            }
            match doc.sections.last_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => doc.preamble.push(line.to_string()),
            }
        }
        doc
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section whose heading title equals `title`.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn section_mut(&mut self, title: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.title == title)
    }

    /// Prepend `entry` to the section titled `title`. Returns false when the
    /// document has no such section.
    pub fn prepend_to_section(&mut self, title: &str, entry: &str) -> bool {
        match self.section_mut(title) {
            Some(section) => {
                section.prepend_entry(entry);
                true
            }
            None => false,
        }
    }

    /// True when any line, headings included, contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.preamble.iter().any(|l| l.contains(needle))
            || self
                .sections
                .iter()
                .any(|s| s.heading.contains(needle) || s.contains(needle))
    }

    /// Replace the first match of `re` in a body line outside fenced code with
    /// `replacement`.
    pub fn replace_first(&mut self, re: &Regex, replacement: &str) -> bool {
        // Headings never open or close a fence, so body lines alone carry the
        // fence state across section boundaries.
        let mut fence = FenceTracker::default();
        let lines = self
            .preamble
            .iter_mut()
            .chain(self.sections.iter_mut().flat_map(|s| s.lines.iter_mut()));
        for line in lines {
            if fence.step(line.as_str()) {
                continue;
            }
            if re.is_match(line.as_str()) {
                *line = re
                    .replace(line.as_str(), regex::NoExpand(replacement))
                    .into_owned();
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.preamble.iter().map(String::as_str).chain(
            self.sections.iter().flat_map(|s| {
                std::iter::once(s.heading.as_str()).chain(s.lines.iter().map(String::as_str))
            }),
        );
        if let Some(first) = lines.next() {
            f.write_str(first)?;
            for line in lines {
                f.write_str("\n")?;
                f.write_str(line)?;
            }
        }
        if self.trailing_newline {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
