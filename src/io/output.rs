use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ConvError, Result};
use crate::models::{LineStats, SourceAggregate, Vocabulary, WordWeights};

/// Paths written for one source
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    /// Primary-speaker features
    pub features: PathBuf,
    /// Secondary-speaker labels
    pub labels: PathBuf,
}

impl OutputPaths {
    pub fn for_source(output_dir: &Path, source: &str) -> Self {
        Self {
            features: output_dir.join(format!("{}.txt", source)),
            labels: output_dir.join(format!("{}.label.txt", source)),
        }
    }
}

/// Entries written for one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteCounts {
    pub feature_entries: usize,
    pub label_entries: usize,
}

/// Write `<source>.txt` and `<source>.label.txt` under `output_dir`
///
/// Each conversation contributes at most one `[ id weight ... ] ` run per
/// file; conversations where a speaker never spoke contribute nothing to
/// that speaker's file.
pub fn write_aggregate(
    output_dir: &Path,
    aggregate: &SourceAggregate,
    vocab: &Vocabulary,
) -> Result<(OutputPaths, WriteCounts)> {
    let paths = OutputPaths::for_source(output_dir, &aggregate.source);
    let mut features = create(&paths.features)?;
    let mut labels = create(&paths.labels)?;
    let mut counts = WriteCounts::default();

    for (_, speakers) in aggregate.conversations.iter() {
        for (&speaker, words) in speakers.iter() {
            if speaker == aggregate.primary_speaker {
                write_bag(&mut features, words, vocab).map_err(|e| ConvError::io(&paths.features, e))?;
                counts.feature_entries += 1;
            } else if speaker == aggregate.secondary_speaker {
                write_bag(&mut labels, words, vocab).map_err(|e| ConvError::io(&paths.labels, e))?;
                counts.label_entries += 1;
            }
        }
    }

    features.flush().map_err(|e| ConvError::io(&paths.features, e))?;
    labels.flush().map_err(|e| ConvError::io(&paths.labels, e))?;

    Ok((paths, counts))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ConvError::io(path, e))
}

/// Write one bracketed `<id> <weight>` run
fn write_bag<W: Write>(out: &mut W, words: &WordWeights, vocab: &Vocabulary) -> std::io::Result<()> {
    out.write_all(b"[ ")?;
    for (word, &weight) in words.iter() {
        let id = vocab.id(word).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("word '{}' is not in the vocabulary", word),
            )
        })?;
        write!(out, "{} {} ", id, format_weight(weight))?;
    }
    out.write_all(b"] ")
}

/// Render a weight the way downstream tools expect Python floats
///
/// Integral weights keep a trailing `.0` (`2.0`). Decimal exponents below
/// -4 or from 16 up switch to exponent form with a signed two-digit
/// exponent (`5e-05`, `1e+16`).
pub fn format_weight(weight: f64) -> String {
    if weight.is_nan() {
        return "nan".to_string();
    }
    if weight.is_infinite() {
        return if weight > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", weight);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if weight != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if weight.fract() == 0.0 {
        format!("{:.1}", weight)
    } else {
        format!("{}", weight)
    }
}

/// Machine-readable account of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub sources: Vec<SourceSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub dialect: String,
    pub effective_weight: f64,
    #[serde(flatten)]
    pub lines: LineStats,
    pub conversations: usize,
    #[serde(flatten)]
    pub written: WriteCounts,
}

impl RunSummary {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| ConvError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| ConvError::io(path, std::io::Error::other(e)))?;
        writer.flush().map_err(|e| ConvError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vocab() -> Vocabulary {
        let ids: HashMap<String, usize> = [("<eps>", 0), ("<s>", 1), ("hi", 2), ("there", 3)]
            .into_iter()
            .map(|(w, i)| (w.to_string(), i))
            .collect();
        Vocabulary::new(ids, None)
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(2.0), "2.0");
        assert_eq!(format_weight(0.0), "0.0");
        assert_eq!(format_weight(0.5), "0.5");
        assert_eq!(format_weight(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_format_weight_exponent_thresholds() {
        assert_eq!(format_weight(1e-4), "0.0001");
        assert_eq!(format_weight(1e-5), "1e-05");
        assert_eq!(format_weight(5e-5), "5e-05");
        assert_eq!(format_weight(1.25e-7), "1.25e-07");
        assert_eq!(format_weight(-5e-5), "-5e-05");
        assert_eq!(format_weight(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_weight(1e16), "1e+16");
        assert_eq!(format_weight(2.5e17), "2.5e+17");
        assert_eq!(format_weight(1e100), "1e+100");
    }

    #[test]
    fn test_write_rejects_word_outside_vocab() {
        let dir = tempfile::tempdir().unwrap();
        let mut agg = SourceAggregate::new("swbd", 'a', 'b');
        agg.add("sw00001", 'a', "hi", 1.0);
        agg.add("sw00001", 'a', "zebra", 1.0);

        let err = write_aggregate(dir.path(), &agg, &vocab()).unwrap_err();

        assert!(matches!(err, ConvError::Io { .. }));
        assert!(err.to_string().contains("zebra"));
    }

    #[test]
    fn test_write_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let mut agg = SourceAggregate::new("swbd", 'a', 'b');
        agg.add("sw00001", 'b', "there", 1.0);
        agg.add("sw00001", 'a', "hi", 2.0);
        agg.add("sw00001", 'a', "there", 1.0);
        agg.add("sw00002", 'a', "hi", 0.5);

        let (paths, counts) = write_aggregate(dir.path(), &agg, &vocab()).unwrap();

        assert_eq!(paths.features, dir.path().join("swbd.txt"));
        assert_eq!(paths.labels, dir.path().join("swbd.label.txt"));
        assert_eq!(
            std::fs::read_to_string(&paths.features).unwrap(),
            "[ 2 2.0 3 1.0 ] [ 2 0.5 ] "
        );
        // sw00002 has no secondary speaker, so no empty bracket
        assert_eq!(
            std::fs::read_to_string(&paths.labels).unwrap(),
            "[ 3 1.0 ] "
        );
        assert_eq!(
            counts,
            WriteCounts {
                feature_entries: 2,
                label_entries: 1
            }
        );
    }

    #[test]
    fn test_write_empty_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let agg = SourceAggregate::new("dev_swbd", 'a', 'b');

        let (paths, counts) = write_aggregate(dir.path(), &agg, &vocab()).unwrap();

        assert_eq!(std::fs::read_to_string(&paths.features).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&paths.labels).unwrap(), "");
        assert_eq!(counts, WriteCounts::default());
    }

    #[test]
    fn test_other_speakers_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut agg = SourceAggregate::new("fisher", 'a', 'b');
        agg.add("fe_03_00001", 'c', "hi", 1.0);

        let (paths, _) = write_aggregate(dir.path(), &agg, &vocab()).unwrap();

        assert_eq!(std::fs::read_to_string(&paths.features).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&paths.labels).unwrap(), "");
    }
}
