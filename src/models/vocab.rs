use std::collections::HashMap;

/// Word to integer-id mapping with an optional unknown-word token
///
/// Ids form the dense range `[0, len)`. When `unk_word` is set it is
/// guaranteed to be a member, so [`Vocabulary::resolve`] only fails for
/// out-of-vocabulary words when no unknown-word token was configured.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: HashMap<String, usize>,
    unk_word: Option<String>,
}

impl Vocabulary {
    pub(crate) fn new(ids: HashMap<String, usize>, unk_word: Option<String>) -> Self {
        Self { ids, unk_word }
    }

    pub fn id(&self, word: &str) -> Option<usize> {
        self.ids.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    pub fn unk_word(&self) -> Option<&str> {
        self.unk_word.as_deref()
    }

    /// Map a transcript word to the vocabulary entry it is counted under
    pub fn resolve<'a>(&'a self, word: &'a str) -> Option<&'a str> {
        if self.ids.contains_key(word) {
            Some(word)
        } else {
            self.unk_word.as_deref()
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
