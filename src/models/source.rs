use std::collections::BTreeMap;
use std::path::PathBuf;

/// A data source discovered in the text directory
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Base name shared by the `.txt` and `.counts` files
    pub name: String,
    /// Line-oriented transcript file
    pub text_path: PathBuf,
    /// Counts file (required to exist, not read by aggregation)
    pub counts_path: PathBuf,
}

/// All sources found in the text directory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: BTreeMap<String, Source>,
}

impl SourceCatalog {
    pub fn from_sources(sources: impl IntoIterator<Item = Source>) -> Self {
        Self {
            sources: sources.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Sources in name order
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
