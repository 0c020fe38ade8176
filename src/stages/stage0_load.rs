use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::io::{read_data_weights, read_vocab, scan_text_dir};
use crate::models::{SourceCatalog, Vocabulary, WeightTable};

/// Validated inputs for the rest of the pipeline
#[derive(Debug)]
pub struct LoadedInputs {
    pub catalog: SourceCatalog,
    pub weights: WeightTable,
    pub vocab: Vocabulary,
}

/// Stage 0: scan the text directory, then load and cross-check weights and vocabulary
pub fn load_inputs(
    text_dir: &Path,
    weights_file: &Path,
    vocab_file: &Path,
    unk_word: &str,
) -> Result<LoadedInputs> {
    let catalog = scan_text_dir(text_dir)?;
    info!("Found {} data sources in {:?}", catalog.len(), text_dir);

    let weights = read_data_weights(weights_file, &catalog)?;
    let vocab = read_vocab(vocab_file, unk_word)?;
    info!(
        "Loaded {} weights and {} vocabulary entries",
        weights.len(),
        vocab.len()
    );

    Ok(LoadedInputs {
        catalog,
        weights,
        vocab,
    })
}
