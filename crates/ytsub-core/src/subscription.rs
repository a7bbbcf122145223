//! Subscription model assembled from a parsed document: global preamble
//! settings plus one entry per section with effective merged settings.

use anyhow::{Context, Result};
use std::path::Path;

use crate::document::Document;
use crate::rules::{resolve_lines, RuleSet, Scope};

/// Settings resolved from the document preamble, applied to every
/// subscription.
#[derive(Debug, Default)]
pub struct GlobalConfig {
    pub arguments: Vec<String>,
    pub organize: RuleSet,
}

/// One subscription with its effective settings already merged in.
#[derive(Debug)]
pub struct Subscription {
    pub name: String,
    /// Downloader flags: global first, then local. Concatenated, never
    /// deduplicated; repeated flags are the downloader's problem.
    pub arguments: Vec<String>,
    /// Global rules overlaid by local rules sharing the same key.
    pub organize: RuleSet,
    pub urls: Vec<String>,
}

/// Everything one pass needs. Rebuilt fresh from disk on every pass, so
/// document edits take effect at the next interval.
#[derive(Debug)]
pub struct SubscriptionSet {
    pub global: GlobalConfig,
    pub subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn from_document(doc: &Document) -> SubscriptionSet {
        let resolved = resolve_lines(&doc.preamble, Scope::Preamble);
        let global = GlobalConfig {
            arguments: resolved.arguments,
            organize: resolved.organize,
        };

        let subscriptions = doc
            .sections
            .iter()
            .map(|section| {
                let local = resolve_lines(&section.front_matter, Scope::Section(&section.name));
                let mut arguments = global.arguments.clone();
                arguments.extend(local.arguments);
                Subscription {
                    name: section.name.clone(),
                    arguments,
                    organize: global.organize.overlaid(&local.organize),
                    urls: section.body.clone(),
                }
            })
            .collect();

        SubscriptionSet {
            global,
            subscriptions,
        }
    }

    /// Reads and parses the subscription document at `path`.
    pub fn load(path: &Path) -> Result<SubscriptionSet> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading subscriptions from {}", path.display()))?;
        Ok(Self::from_document(&Document::parse(&text)))
    }
}
