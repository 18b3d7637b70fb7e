/*
 * source_text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lookups into the raw source around parser events.
//!
//! The yaml-rust2 event stream carries numeric anchor ids and drops comments,
//! so anchor names and comments are read back from the text at the event
//! markers. Marker indices count characters, not bytes.

use crate::NodeStyle;

pub(crate) struct SourceText {
    chars: Vec<char>,
}

impl SourceText {
    pub(crate) fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
        }
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Index of the first character of the line containing `index`.
    fn line_start(&self, index: usize) -> usize {
        let index = index.min(self.chars.len());
        self.chars[..index]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |newline| newline + 1)
    }

    /// Index of the line break (or end of input) ending the line containing `index`.
    fn line_end(&self, index: usize) -> usize {
        let index = index.min(self.chars.len());
        self.chars[index..]
            .iter()
            .position(|&c| c == '\n' || c == '\r')
            .map_or(self.chars.len(), |offset| index + offset)
    }

    /// The name of the nearest `&anchor` property in `[start, end)`, searching
    /// backwards from `end` and ignoring comments.
    pub(crate) fn anchor_before(&self, start: usize, end: usize) -> Option<String> {
        let end = end.min(self.chars.len());
        if start >= end {
            return None;
        }

        let mut segment_end = end;
        loop {
            let segment_start = self.line_start(segment_end).max(start);
            let segment = strip_comment(&self.chars[segment_start..segment_end]);
            if let Some(name) = last_anchor(segment) {
                return Some(name);
            }
            if segment_start <= start {
                return None;
            }
            segment_end = segment_start - 1;
        }
    }

    /// Full-line comments directly above the line holding `index`, at the
    /// same indentation as that line.
    pub(crate) fn head_comment_above(&self, index: usize) -> String {
        let line_start = self.line_start(index);
        let indent = indentation(&self.chars[line_start..self.line_end(line_start)]);

        let mut lines = Vec::new();
        let mut cursor = line_start;
        while cursor > 0 {
            let previous_start = self.line_start(cursor - 1);
            let previous = &self.chars[previous_start..self.line_end(previous_start)];
            let previous_indent = indentation(previous);
            if previous_indent != indent || previous.get(previous_indent) != Some(&'#') {
                break;
            }
            let text: String = previous[previous_indent..].iter().collect();
            lines.push(text.trim_end().to_string());
            cursor = previous_start;
        }

        lines.reverse();
        lines.join("\n")
    }

    /// A `# comment` following the scalar that starts at `index` on the same line.
    pub(crate) fn scalar_line_comment(&self, index: usize, style: NodeStyle, in_flow: bool) -> String {
        let line_end = self.line_end(index);
        let scalar_end = match style {
            NodeStyle::DoubleQuoted => self.quoted_end(index, line_end, '"'),
            NodeStyle::SingleQuoted => self.quoted_end(index, line_end, '\''),
            NodeStyle::Plain => Some(self.plain_end(index, line_end, in_flow)),
            _ => None,
        };
        match scalar_end {
            Some(scalar_end) => self.trailing_comment(scalar_end, line_end),
            None => String::new(),
        }
    }

    /// A `# comment` after the closing bracket of a flow collection at `index`.
    pub(crate) fn flow_end_line_comment(&self, index: usize) -> String {
        let start = match self.char_at(index) {
            Some(']') | Some('}') => index + 1,
            _ => index,
        };
        self.trailing_comment(start, self.line_end(start))
    }

    fn trailing_comment(&self, start: usize, line_end: usize) -> String {
        if start > line_end {
            return String::new();
        }
        let rest: String = self.chars[start..line_end].iter().collect();
        let rest = rest.trim();
        if rest.starts_with('#') {
            rest.to_string()
        } else {
            String::new()
        }
    }

    fn quoted_end(&self, index: usize, line_end: usize, quote: char) -> Option<usize> {
        if self.char_at(index) != Some(quote) {
            return None;
        }
        let mut i = index + 1;
        while i < line_end {
            let c = self.chars[i];
            if quote == '"' && c == '\\' {
                i += 2;
                continue;
            }
            if c == quote {
                if quote == '\'' && self.char_at(i + 1) == Some('\'') {
                    i += 2;
                    continue;
                }
                return Some(i + 1);
            }
            i += 1;
        }
        // Continues on the next line.
        None
    }

    fn plain_end(&self, index: usize, line_end: usize, in_flow: bool) -> usize {
        let mut i = index;
        while i < line_end {
            let c = self.chars[i];
            if c == '#' && i > index && self.chars[i - 1].is_whitespace() {
                return i;
            }
            if in_flow && matches!(c, ',' | ']' | '}') {
                return i;
            }
            i += 1;
        }
        line_end
    }
}

fn indentation(line: &[char]) -> usize {
    line.iter().take_while(|&&c| c == ' ').count()
}

fn strip_comment(segment: &[char]) -> &[char] {
    let comment = segment
        .iter()
        .enumerate()
        .position(|(i, &c)| c == '#' && (i == 0 || segment[i - 1].is_whitespace()));
    match comment {
        Some(at) => &segment[..at],
        None => segment,
    }
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '[' | ']' | '{' | '}')
}

fn last_anchor(segment: &[char]) -> Option<String> {
    let mut found = None;
    for (i, &c) in segment.iter().enumerate() {
        if c != '&' {
            continue;
        }
        let starts_token = i == 0 || {
            let before = segment[i - 1];
            before.is_whitespace() || matches!(before, '[' | '{' | ',')
        };
        if !starts_token {
            continue;
        }
        let name: String = segment[i + 1..]
            .iter()
            .take_while(|&&c| is_name_char(c))
            .collect();
        if !name.is_empty() {
            found = Some(name);
        }
    }
    found
}
