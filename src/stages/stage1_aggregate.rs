use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::dialect::{Dialect, MalformedLinePolicy, SourceRegistry, SourceRule};
use crate::error::{ConvError, Result};
use crate::models::{Source, SourceAggregate, SourceCatalog, Vocabulary, WeightTable};

/// Read-only state shared by every source's aggregation
#[derive(Debug, Clone, Copy)]
pub struct AggregationContext<'a> {
    /// Vocabulary, including the unknown-word choice
    pub vocab: &'a Vocabulary,
}

/// A registered source after aggregation
#[derive(Debug, Clone)]
pub struct AggregatedSource {
    pub aggregate: SourceAggregate,
    pub dialect: Dialect,
    pub effective_weight: f64,
}

/// Stage 1: aggregate every catalogued source that has a registry rule
///
/// Sources without a rule are validated upstream but produce nothing here.
/// Sources whose effective weight is zero yield an empty aggregate without
/// their transcript being read.
pub fn aggregate_all(
    catalog: &SourceCatalog,
    weights: &WeightTable,
    registry: &SourceRegistry,
    ctx: &AggregationContext<'_>,
) -> Result<Vec<AggregatedSource>> {
    let mut results = Vec::new();

    for source in catalog.iter() {
        let Some(rule) = registry.lookup(&source.name) else {
            debug!("No registry rule for data source {}, ignoring", source.name);
            continue;
        };
        let effective_weight = weights
            .get(&source.name)
            .ok_or_else(|| ConvError::MissingWeight {
                name: source.name.clone(),
            })?
            .effective();

        let aggregate = if effective_weight == 0.0 {
            info!("Skipping {} (effective weight is 0)", source.name);
            SourceAggregate::new(&source.name, rule.primary_speaker, rule.secondary_speaker)
        } else {
            aggregate_source(source, effective_weight, rule, ctx)?
        };

        info!(
            "{}: {} conversations from {} lines ({} skipped), weight {}",
            source.name,
            aggregate.conversation_count(),
            aggregate.stats.lines_read,
            aggregate.stats.lines_skipped,
            effective_weight
        );

        results.push(AggregatedSource {
            aggregate,
            dialect: rule.dialect,
            effective_weight,
        });
    }

    Ok(results)
}

/// Aggregate one source's transcript file
pub fn aggregate_source(
    source: &Source,
    weight: f64,
    rule: &SourceRule,
    ctx: &AggregationContext<'_>,
) -> Result<SourceAggregate> {
    let path = &source.text_path;
    let file = std::fs::File::open(path).map_err(|e| ConvError::io(path, e))?;
    aggregate_reader(
        &source.name,
        path,
        std::io::BufReader::new(file),
        weight,
        rule,
        ctx,
    )
}

/// Aggregate transcript lines from any reader; `path` is only used in errors
pub fn aggregate_reader<R: BufRead>(
    name: &str,
    path: &Path,
    reader: R,
    weight: f64,
    rule: &SourceRule,
    ctx: &AggregationContext<'_>,
) -> Result<SourceAggregate> {
    let mut aggregate = SourceAggregate::new(name, rule.primary_speaker, rule.secondary_speaker);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ConvError::io(path, e))?;
        aggregate.stats.lines_read += 1;

        let utterance = match rule.dialect.parse_line(&line) {
            Ok(utterance) => utterance,
            Err(reason) => match rule.malformed_lines {
                MalformedLinePolicy::Skip => {
                    trace!("{}:{}: skipping line: {}", name, index + 1, reason);
                    aggregate.stats.lines_skipped += 1;
                    continue;
                }
                MalformedLinePolicy::Fail => {
                    return Err(ConvError::MalformedTranscriptLine {
                        path: path.to_path_buf(),
                        line_number: index + 1,
                        reason,
                    });
                }
            },
        };

        for word in &utterance.words {
            let word = ctx
                .vocab
                .resolve(word)
                .ok_or_else(|| ConvError::OutOfVocabulary {
                    word: word.to_string(),
                    path: path.to_path_buf(),
                })?;
            aggregate.add(utterance.conversation, utterance.speaker, word, weight);
        }

        if rule.is_primary(utterance.speaker) {
            aggregate.record_turn(utterance.conversation);
        }
    }

    aggregate.normalize_primary();
    Ok(aggregate)
}
