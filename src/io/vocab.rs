use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::{ConvError, Result};
use crate::models::Vocabulary;

/// Read `<word> <id>` lines into a [`Vocabulary`]
///
/// Ids must cover `0..n` with no gaps or repeats. An empty `unk_word` means
/// no unknown-word token; otherwise it must be in the file.
pub fn read_vocab(path: &Path, unk_word: &str) -> Result<Vocabulary> {
    let file = std::fs::File::open(path).map_err(|e| ConvError::io(path, e))?;
    let reader = std::io::BufReader::new(file);

    let mut ids: HashMap<String, usize> = HashMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ConvError::io(path, e))?;
        let malformed = || ConvError::MalformedVocabLine {
            path: path.to_path_buf(),
            line_number: index + 1,
            line: line.clone(),
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [word, id] = fields[..] else {
            return Err(malformed());
        };
        let id: usize = id.parse().map_err(|_| malformed())?;

        if ids.contains_key(word) {
            return Err(ConvError::DuplicateWord {
                word: word.to_string(),
                path: path.to_path_buf(),
            });
        }
        ids.insert(word.to_string(), id);
    }

    check_dense(&ids)?;

    let unk_word = if unk_word.is_empty() {
        None
    } else if ids.contains_key(unk_word) {
        Some(unk_word.to_string())
    } else {
        return Err(ConvError::UnknownWordMissing {
            word: unk_word.to_string(),
            path: path.to_path_buf(),
        });
    };

    Ok(Vocabulary::new(ids, unk_word))
}

fn check_dense(ids: &HashMap<String, usize>) -> Result<()> {
    let mut sorted: Vec<usize> = ids.values().copied().collect();
    sorted.sort_unstable();
    for (expected, &found) in sorted.iter().enumerate() {
        if expected != found {
            return Err(ConvError::IdDensity { expected, found });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_vocab(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), content).unwrap();
        file
    }

    #[test]
    fn test_read_vocab() {
        let file = write_vocab("<eps> 0\n<s> 1\nhi 3\nthere 2\n");
        let vocab = read_vocab(file.path(), "").unwrap();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.id("hi"), Some(3));
        assert_eq!(vocab.unk_word(), None);
    }

    #[test]
    fn test_id_gap() {
        let file = write_vocab("<eps> 0\n<s> 1\nhi 3\n");
        let err = read_vocab(file.path(), "").unwrap_err();
        assert!(matches!(err, ConvError::IdDensity { expected: 2, found: 3 }));
    }

    #[test]
    fn test_repeated_id() {
        let file = write_vocab("<eps> 0\n<s> 1\nhi 1\n");
        let err = read_vocab(file.path(), "").unwrap_err();
        assert!(matches!(err, ConvError::IdDensity { expected: 2, found: 1 }));
    }

    #[test]
    fn test_ids_not_starting_at_zero() {
        let file = write_vocab("<s> 1\nhi 2\n");
        assert!(matches!(
            read_vocab(file.path(), ""),
            Err(ConvError::IdDensity { expected: 0, found: 1 })
        ));
    }

    #[test]
    fn test_duplicate_word() {
        let file = write_vocab("<eps> 0\nhi 1\nhi 2\n");
        let err = read_vocab(file.path(), "").unwrap_err();
        assert!(matches!(err, ConvError::DuplicateWord { ref word, .. } if word == "hi"));
    }

    #[test]
    fn test_malformed_line() {
        let file = write_vocab("<eps> 0\nhi\n");
        let err = read_vocab(file.path(), "").unwrap_err();
        assert!(matches!(err, ConvError::MalformedVocabLine { line_number: 2, .. }));

        let file = write_vocab("<eps> zero\n");
        assert!(read_vocab(file.path(), "").is_err());
    }

    #[test]
    fn test_unk_word() {
        let file = write_vocab("<eps> 0\n<unk> 1\n");
        let vocab = read_vocab(file.path(), "<unk>").unwrap();
        assert_eq!(vocab.unk_word(), Some("<unk>"));

        let err = read_vocab(file.path(), "<oov>").unwrap_err();
        assert!(matches!(err, ConvError::UnknownWordMissing { .. }));
    }
}
