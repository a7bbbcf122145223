//! Directive resolution for preamble and front-matter lines: organize rules
//! plus shell-like downloader-argument tokenization.

use std::fmt;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Prefix marking an organize directive line.
pub const ORGANIZE_PREFIX: &str = "-organize ";

/// Why a single organize directive was rejected. Rule-level failures are
/// diagnosed and skipped; they never abort parsing of the rest of the
/// document.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("expected `-organize key: /pattern/flags`")]
    MalformedDirective,
    #[error("value is not a /pattern/flags regex literal")]
    NotARegexLiteral,
    #[error("empty pattern")]
    EmptyPattern,
    #[error("unsupported regex flag `{0}`")]
    UnsupportedFlag(char),
    #[error("invalid pattern: {0}")]
    BadPattern(String),
}

/// One organize rule: a compiled filename pattern routing matches into a
/// destination subdirectory named by the rule's key.
#[derive(Clone)]
pub struct OrganizeRule {
    pattern: Regex,
    /// Original `/pattern/flags` literal, kept for display.
    literal: String,
}

impl fmt::Debug for OrganizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl OrganizeRule {
    /// Compiles a `/pattern/flags` literal. The flag alphabet is `gimsuy`
    /// (the original document format): `i`, `m`, `s` map onto the engine,
    /// while `g`, `u`, `y` have no counterpart in a match test and are
    /// accepted as no-ops. Anything else rejects the rule.
    pub fn from_literal(literal: &str) -> Result<OrganizeRule, RuleError> {
        let rest = literal
            .strip_prefix('/')
            .ok_or(RuleError::NotARegexLiteral)?;
        // Flags follow the last slash, so a `/` inside the pattern is fine.
        let (pattern, flags) = rest.rsplit_once('/').ok_or(RuleError::NotARegexLiteral)?;
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }

        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'y' => {}
                other => return Err(RuleError::UnsupportedFlag(other)),
            }
        }

        let pattern = builder
            .build()
            .map_err(|e| RuleError::BadPattern(e.to_string()))?;
        Ok(OrganizeRule {
            pattern,
            literal: literal.to_string(),
        })
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }

    /// The `/pattern/flags` literal this rule was compiled from.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Insertion-ordered destination → rule map.
///
/// Re-inserting an existing key replaces the rule but keeps the key's
/// original position, so merged iteration order matches documents written
/// for the original tool.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    entries: Vec<(String, OrganizeRule)>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet::default()
    }

    pub fn insert(&mut self, key: String, rule: OrganizeRule) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = rule;
        } else {
            self.entries.push((key, rule));
        }
    }

    pub fn get(&self, key: &str) -> Option<&OrganizeRule> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrganizeRule)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `self` overlaid by `local`: same-key local rules replace the
    /// global entry (keeping its position), local-only keys append in order.
    pub fn overlaid(&self, local: &RuleSet) -> RuleSet {
        let mut merged = self.clone();
        for (key, rule) in &local.entries {
            merged.insert(key.clone(), rule.clone());
        }
        merged
    }
}

/// Where a directive line came from, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Preamble,
    Section(&'a str),
}

impl fmt::Display for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Preamble => f.write_str("preamble"),
            Scope::Section(name) => write!(f, "[{}]", name),
        }
    }
}

/// Result of resolving one scope's lines.
#[derive(Debug, Default)]
pub struct Directives {
    pub arguments: Vec<String>,
    pub organize: RuleSet,
}

/// Interprets each line as either an organize directive or downloader
/// arguments. A bad directive is logged against its scope and skipped.
pub fn resolve_lines(lines: &[String], scope: Scope<'_>) -> Directives {
    let mut directives = Directives::default();
    for line in lines {
        if line.starts_with(ORGANIZE_PREFIX) {
            match parse_organize(line) {
                Ok((key, rule)) => directives.organize.insert(key, rule),
                Err(err) => {
                    tracing::warn!("invalid organize rule at {} `{}`: {}", scope, line, err);
                }
            }
        } else {
            directives.arguments.extend(tokenize_args(line));
        }
    }
    directives
}

/// Parses a `-organize key: /pattern/flags` line. The key may be wrapped in
/// double quotes (stripped); the value splits off at the first colon.
pub fn parse_organize(line: &str) -> Result<(String, OrganizeRule), RuleError> {
    let rest = line
        .strip_prefix(ORGANIZE_PREFIX)
        .ok_or(RuleError::MalformedDirective)?;
    let (key, value) = rest.split_once(':').ok_or(RuleError::MalformedDirective)?;
    let key = unquote(key.trim());
    if key.is_empty() {
        return Err(RuleError::MalformedDirective);
    }
    let rule = OrganizeRule::from_literal(value.trim())?;
    Ok((key.to_string(), rule))
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Splits a line into downloader arguments: maximal runs of non-whitespace
/// characters, with double-quoted substrings folded into the surrounding
/// token and the quotes stripped.
pub fn tokenize_args(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
