use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConvError, Result};
use crate::io::{write_aggregate, RunSummary, SourceSummary};
use crate::models::Vocabulary;

use super::AggregatedSource;

/// Stage 2: write the feature/label file pair for every aggregated source
pub fn write_outputs(
    output_dir: &Path,
    sources: &[AggregatedSource],
    vocab: &Vocabulary,
) -> Result<RunSummary> {
    std::fs::create_dir_all(output_dir).map_err(|e| ConvError::io(output_dir, e))?;

    let mut summary = RunSummary::default();
    for source in sources {
        let aggregate = &source.aggregate;
        let (paths, written) = write_aggregate(output_dir, aggregate, vocab)?;
        debug!("Wrote {:?} and {:?}", paths.features, paths.labels);
        info!(
            "{}: {} feature entries, {} label entries",
            aggregate.source, written.feature_entries, written.label_entries
        );

        summary.sources.push(SourceSummary {
            name: aggregate.source.clone(),
            dialect: source.dialect.name().to_string(),
            effective_weight: source.effective_weight,
            lines: aggregate.stats,
            conversations: aggregate.conversation_count(),
            written,
        });
    }

    Ok(summary)
}
