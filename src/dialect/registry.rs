use std::path::Path;

use serde::Deserialize;

use super::{Dialect, MalformedLinePolicy};
use crate::error::{ConvError, Result};

const DEFAULT_PRIMARY_SPEAKER: char = 'a';
const DEFAULT_SECONDARY_SPEAKER: char = 'b';

/// How one family of source names is parsed and split into features/labels
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRule {
    /// Exact source name, or a prefix when it ends in `*`
    pub pattern: String,
    pub dialect: Dialect,
    /// Speaker normalized into probabilities (written to `<source>.txt`)
    pub primary_speaker: char,
    /// Speaker written raw to `<source>.label.txt`
    pub secondary_speaker: char,
    pub malformed_lines: MalformedLinePolicy,
}

impl SourceRule {
    pub fn new(pattern: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            pattern: pattern.into(),
            dialect,
            primary_speaker: DEFAULT_PRIMARY_SPEAKER,
            secondary_speaker: DEFAULT_SECONDARY_SPEAKER,
            malformed_lines: dialect.default_policy(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self.pattern.strip_suffix('*') {
            Some(prefix) => name.starts_with(prefix),
            None => self.pattern == name,
        }
    }

    /// Whether `speaker`'s counts are normalized by turn count
    pub fn is_primary(&self, speaker: char) -> bool {
        speaker == self.primary_speaker
    }
}

/// Ordered rule list; the first matching rule wins
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRegistry {
    rules: Vec<SourceRule>,
}

impl Default for SourceRegistry {
    /// Main, held-out subset and dev variants of both corpora
    fn default() -> Self {
        let rules = ["fisher", "fisher_sub", "dev_fisher"]
            .into_iter()
            .map(|name| SourceRule::new(name, Dialect::Fisher))
            .chain(
                ["swbd", "swbd_sub", "dev_swbd"]
                    .into_iter()
                    .map(|name| SourceRule::new(name, Dialect::Switchboard)),
            )
            .collect();
        Self { rules }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    sources: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    pattern: String,
    dialect: Dialect,
    primary_speaker: Option<String>,
    secondary_speaker: Option<String>,
    malformed_lines: Option<MalformedLinePolicy>,
}

impl SourceRegistry {
    pub fn new(rules: Vec<SourceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SourceRule] {
        &self.rules
    }

    /// Rule for a source name, `None` if the source is not aggregated
    pub fn lookup(&self, name: &str) -> Option<&SourceRule> {
        self.rules.iter().find(|rule| rule.matches(name))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a registry such as
    /// `{"sources": [{"pattern": "callhome*", "dialect": "switchboard"}]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RegistryFile =
            serde_json::from_str(json).map_err(|e| ConvError::Registry(e.to_string()))?;

        let mut rules = Vec::with_capacity(file.sources.len());
        for entry in file.sources {
            if entry.pattern.is_empty() {
                return Err(ConvError::Registry("empty source pattern".to_string()));
            }
            let mut rule = SourceRule::new(entry.pattern, entry.dialect);
            if let Some(speaker) = entry.primary_speaker {
                rule.primary_speaker = single_char(&rule.pattern, &speaker)?;
            }
            if let Some(speaker) = entry.secondary_speaker {
                rule.secondary_speaker = single_char(&rule.pattern, &speaker)?;
            }
            if rule.primary_speaker == rule.secondary_speaker {
                return Err(ConvError::Registry(format!(
                    "source '{}': primary and secondary speaker are both '{}'",
                    rule.pattern, rule.primary_speaker
                )));
            }
            if let Some(policy) = entry.malformed_lines {
                rule.malformed_lines = policy;
            }
            rules.push(rule);
        }

        Ok(Self { rules })
    }
}

fn single_char(pattern: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConvError::Registry(format!(
            "source '{}': speaker label must be one character, got '{}'",
            pattern, value
        ))),
    }
}
