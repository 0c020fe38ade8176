pub mod dialect;
pub mod error;
pub mod io;
pub mod models;
pub mod stages;

pub use dialect::{Dialect, MalformedLinePolicy, SourceRegistry, SourceRule};
pub use error::{ConvError, Result};
pub use io::{ensure_counts_present, write_aggregate, PrecheckOutcome, RunSummary, DEFAULT_COUNTS_HELPER};
pub use models::{Source, SourceAggregate, SourceCatalog, Vocabulary, WeightEntry, WeightTable};
pub use stages::{
    aggregate_all, aggregate_source, load_inputs, write_outputs, AggregatedSource,
    AggregationContext, LoadedInputs,
};
