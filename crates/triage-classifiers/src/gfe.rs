//! GFE (Good Faith Estimate) follow-up detection

use aho_corasick::AhoCorasick;
use triage_core::{Error, Result};

/// Flags communications containing any configured GFE keyword
pub struct GfeDetector {
    keywords: Vec<String>,
    matcher: AhoCorasick,
}

impl GfeDetector {
    /// Build a detector; empty keywords are ignored
    pub fn new(keywords: &[String], case_insensitive: bool) -> Result<Self> {
        let keywords: Vec<String> = keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(case_insensitive)
            .build(&keywords)
            .map_err(|e| Error::config(format!("failed to build GFE keyword matcher: {}", e)))?;

        Ok(Self { keywords, matcher })
    }

    /// Whether the communication text marks the row GFE
    pub fn is_gfe(&self, communication: &str) -> bool {
        self.matcher.is_match(communication)
    }

    /// The keyword found first in the text, if any
    pub fn matched_keyword(&self, communication: &str) -> Option<&str> {
        self.matcher
            .find(communication)
            .map(|m| self.keywords[m.pattern().as_usize()].as_str())
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
