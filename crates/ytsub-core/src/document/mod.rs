//! Subscription document tokenizer.
//!
//! Turns raw text into a preamble plus an ordered list of `[name]` sections,
//! each split at the first separator line (four or more `-`/`=`) into front
//! matter and body. Comment stripping is quote/regex-aware (see `scan`).

mod scan;

/// A parsed subscription document: global preamble lines plus sections in
/// source order.
#[derive(Debug, Default, PartialEq)]
pub struct Document {
    pub preamble: Vec<String>,
    pub sections: Vec<Section>,
}

/// One `[name]` block. Duplicate names are allowed and never merged.
#[derive(Debug, PartialEq)]
pub struct Section {
    pub name: String,
    pub front_matter: Vec<String>,
    pub body: Vec<String>,
}

/// Full-line comment markers recognized at the start of a trimmed line.
fn is_full_line_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with("//") || trimmed.starts_with(';')
}

/// Front-matter/body separator: a line of four or more `-` or `=` characters,
/// optionally surrounded by whitespace.
fn is_separator(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 4 && t.chars().all(|c| c == '-' || c == '=')
}

impl Document {
    /// Tokenizes document text. Never fails: malformed lines are just content,
    /// and a file with no headers yields an empty section list (global-only
    /// config).
    pub fn parse(text: &str) -> Document {
        let mut preamble = Vec::new();
        let mut raw_sections: Vec<(String, Vec<String>)> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_full_line_comment(trimmed) {
                continue;
            }
            let stripped = scan::strip_inline_comment(trimmed);
            let stripped = stripped.trim();
            if stripped.is_empty() {
                continue;
            }
            if stripped.starts_with('[') && stripped.ends_with(']') {
                let name = stripped[1..stripped.len() - 1].to_string();
                raw_sections.push((name, Vec::new()));
            } else if let Some((_, content)) = raw_sections.last_mut() {
                content.push(stripped.to_string());
            } else {
                preamble.push(stripped.to_string());
            }
        }

        let sections = raw_sections
            .into_iter()
            .map(|(name, content)| Section::from_content(name, content))
            .collect();

        Document { preamble, sections }
    }
}

impl Section {
    /// Splits raw section content at the first separator line. No separator
    /// means everything is body and front matter stays empty.
    fn from_content(name: String, content: Vec<String>) -> Section {
        match content.iter().position(|l| is_separator(l)) {
            Some(idx) => {
                let mut front_matter = content;
                let body = front_matter.split_off(idx + 1);
                front_matter.pop();
                Section {
                    name,
                    front_matter,
                    body,
                }
            }
            None => Section {
                name,
                front_matter: Vec::new(),
                body: content,
            },
        }
    }
}
