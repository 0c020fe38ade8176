pub mod registry;

pub use registry::*;

use serde::{Deserialize, Serialize};

/// Fisher ids look like `fe_03_00001_a:`
const FISHER_MIN_ID_LEN: usize = 13;
const FISHER_CONVERSATION_LEN: usize = 11;

/// Switchboard ids look like `sw04940-B_029056-029800`
const SWITCHBOARD_CONVERSATION_LEN: usize = 7;
const SWITCHBOARD_SPEAKER_OFFSET: usize = 8;

/// Transcript id convention of a corpus family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Conversation = first 11 chars, speaker = second-to-last char
    Fisher,
    /// Conversation = first 7 chars, speaker = char 8, lowercased
    Switchboard,
}

/// What to do with a line the dialect cannot split into id and words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    Skip,
    Fail,
}

/// One transcript line split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance<'a> {
    pub conversation: &'a str,
    pub speaker: char,
    pub words: Vec<&'a str>,
}

impl Dialect {
    /// Policy used when a registry rule doesn't set one
    pub fn default_policy(self) -> MalformedLinePolicy {
        match self {
            Dialect::Fisher => MalformedLinePolicy::Skip,
            Dialect::Switchboard => MalformedLinePolicy::Fail,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Fisher => "fisher",
            Dialect::Switchboard => "switchboard",
        }
    }

    /// Split a transcript line into conversation, speaker and words.
    ///
    /// On failure the error is a short description of what was wrong with
    /// the line; whether that is fatal is up to the caller's policy.
    pub fn parse_line(self, line: &str) -> Result<Utterance<'_>, String> {
        let mut fields = line.split_whitespace();
        let id = fields.next().ok_or_else(|| "empty line".to_string())?;
        let words: Vec<&str> = fields.collect();
        if words.is_empty() {
            return Err(format!("expected an id and at least one word, got '{}'", id));
        }

        match self {
            Dialect::Fisher => {
                let id_len = id.chars().count();
                if id_len < FISHER_MIN_ID_LEN {
                    return Err(format!(
                        "id '{}' shorter than {} characters",
                        id, FISHER_MIN_ID_LEN
                    ));
                }
                let conversation = char_prefix(id, FISHER_CONVERSATION_LEN);
                let speaker = id
                    .chars()
                    .nth(id_len - 2)
                    .ok_or_else(|| format!("id '{}' has no speaker character", id))?;
                Ok(Utterance {
                    conversation,
                    speaker,
                    words,
                })
            }
            Dialect::Switchboard => {
                let speaker = id
                    .chars()
                    .nth(SWITCHBOARD_SPEAKER_OFFSET)
                    .ok_or_else(|| {
                        format!(
                            "id '{}' has no speaker character at offset {}",
                            id, SWITCHBOARD_SPEAKER_OFFSET
                        )
                    })?;
                let conversation = char_prefix(id, SWITCHBOARD_CONVERSATION_LEN);
                Ok(Utterance {
                    conversation,
                    speaker: lowercase(speaker),
                    words,
                })
            }
        }
    }
}

/// The first `n` characters of `s` (all of it if shorter)
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
