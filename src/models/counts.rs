use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Map that iterates in first-insertion order
///
/// Output files list conversations, speakers and words in the order they
/// were first seen in the transcript, so plain `HashMap` iteration won't do.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Look up `key`, inserting `default()` at the end if it is new
    pub fn get_or_insert_with<Q>(&mut self, key: &Q, default: impl FnOnce() -> V) -> &mut V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let owned = key.to_owned();
                let i = self.entries.len();
                self.index.insert(owned.clone(), i);
                self.entries.push((owned, default()));
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulated weight per vocabulary word
pub type WordWeights = OrderedMap<String, f64>;

/// Word weights per speaker label within one conversation
pub type SpeakerWeights = OrderedMap<char, WordWeights>;

/// Line accounting for one transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    /// Lines read from the transcript
    pub lines_read: usize,
    /// Malformed lines dropped under the skip policy
    pub lines_skipped: usize,
}

/// Weighted word counts for one source, keyed by conversation and speaker
#[derive(Debug, Clone)]
pub struct SourceAggregate {
    /// Source name (output file stem)
    pub source: String,
    /// Speaker whose weights become probabilities (feature side)
    pub primary_speaker: char,
    /// Speaker whose raw weights become labels
    pub secondary_speaker: char,
    /// conversation -> speaker -> word -> weight
    pub conversations: OrderedMap<String, SpeakerWeights>,
    /// Primary-speaker turns per conversation
    pub turn_counts: HashMap<String, u64>,
    pub stats: LineStats,
    normalized: bool,
}

impl SourceAggregate {
    pub fn new(source: impl Into<String>, primary_speaker: char, secondary_speaker: char) -> Self {
        Self {
            source: source.into(),
            primary_speaker,
            secondary_speaker,
            conversations: OrderedMap::new(),
            turn_counts: HashMap::new(),
            stats: LineStats::default(),
            normalized: false,
        }
    }

    /// Add `weight` to one word occurrence
    pub fn add(&mut self, conversation: &str, speaker: char, word: &str, weight: f64) {
        let words = self
            .conversations
            .get_or_insert_with(conversation, OrderedMap::new)
            .get_or_insert_with(&speaker, OrderedMap::new);
        *words.get_or_insert_with(word, || 0.0) += weight;
    }

    /// Count one primary-speaker turn in `conversation`
    pub fn record_turn(&mut self, conversation: &str) {
        match self.turn_counts.get_mut(conversation) {
            Some(turns) => *turns += 1,
            None => {
                self.turn_counts.insert(conversation.to_string(), 1);
            }
        }
    }

    pub fn turn_count(&self, conversation: &str) -> u64 {
        self.turn_counts.get(conversation).copied().unwrap_or(0)
    }

    /// Divide every primary-speaker weight by that conversation's turn count
    ///
    /// Secondary speakers keep their raw weights. Calling this twice is a
    /// no-op the second time.
    pub fn normalize_primary(&mut self) {
        if self.normalized {
            return;
        }
        let primary = self.primary_speaker;
        for (conversation, speakers) in self.conversations.iter_mut() {
            let turns = self.turn_counts.get(conversation).copied().unwrap_or(0);
            if turns == 0 {
                continue;
            }
            if let Some(words) = speakers.get_mut(&primary) {
                for (_, weight) in words.iter_mut() {
                    *weight /= turns as f64;
                }
            }
        }
        self.normalized = true;
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    /// Number of conversations in which `speaker` said anything
    pub fn speaker_conversations(&self, speaker: char) -> usize {
        self.conversations
            .iter()
            .filter(|(_, speakers)| speakers.get(&speaker).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_keeps_insertion_order() {
        let mut map: OrderedMap<String, u32> = OrderedMap::new();
        for key in ["zeta", "alpha", "mid", "alpha"] {
            *map.get_or_insert_with(key, || 0) += 1;
        }
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(map.get("alpha"), Some(&2));
    }

    #[test]
    fn test_normalize_divides_by_turns() {
        let mut agg = SourceAggregate::new("swbd", 'a', 'b');
        agg.add("sw00001", 'a', "hi", 1.5);
        agg.add("sw00001", 'a', "hi", 1.5);
        agg.record_turn("sw00001");
        agg.add("sw00001", 'a', "there", 1.5);
        agg.record_turn("sw00001");
        agg.add("sw00001", 'b', "hi", 1.5);
        agg.add("sw00001", 'b', "hi", 1.5);

        agg.normalize_primary();
        agg.normalize_primary();

        let speakers = agg.conversations.get("sw00001").unwrap();
        let primary = speakers.get(&'a').unwrap();
        assert_eq!(primary.get("hi"), Some(&1.5));
        assert_eq!(primary.get("there"), Some(&0.75));
        // secondary untouched
        assert_eq!(speakers.get(&'b').unwrap().get("hi"), Some(&3.0));
    }

    #[test]
    fn test_record_turn_per_conversation() {
        let mut agg = SourceAggregate::new("swbd", 'a', 'b');
        agg.record_turn("sw00001");
        agg.record_turn("sw00002");
        agg.record_turn("sw00001");
        assert_eq!(agg.turn_count("sw00001"), 2);
        assert_eq!(agg.turn_count("sw00002"), 1);
        assert_eq!(agg.turn_count("sw00003"), 0);
    }

    #[test]
    fn test_speaker_conversations() {
        let mut agg = SourceAggregate::new("fisher", 'a', 'b');
        agg.add("fe_03_00001", 'a', "hi", 1.0);
        agg.add("fe_03_00002", 'b', "hi", 1.0);
        agg.add("fe_03_00002", 'a', "hi", 1.0);
        assert_eq!(agg.conversation_count(), 2);
        assert_eq!(agg.speaker_conversations('a'), 2);
        assert_eq!(agg.speaker_conversations('b'), 1);
    }
}
