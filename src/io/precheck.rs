use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

/// Helper that generates missing `.counts` files next to the transcripts
pub const DEFAULT_COUNTS_HELPER: &str = "rnnlm/ensure_counts_present.sh";

/// Outcome of running the counts helper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecheckOutcome {
    Succeeded,
    /// Helper ran but exited non-zero (`None` when killed by a signal)
    Failed { code: Option<i32> },
    /// Helper could not be started at all
    NotLaunched { reason: String },
}

/// Run `<helper> <text_dir>`.
///
/// A failing helper does not stop the run: the catalog scan that follows
/// reports any `.counts` file that is still missing.
pub fn ensure_counts_present(helper: &Path, text_dir: &Path) -> PrecheckOutcome {
    debug!("Running {:?} {:?}", helper, text_dir);
    let outcome = match Command::new(helper).arg(text_dir).status() {
        Ok(status) if status.success() => PrecheckOutcome::Succeeded,
        Ok(status) => PrecheckOutcome::Failed {
            code: status.code(),
        },
        Err(e) => PrecheckOutcome::NotLaunched {
            reason: e.to_string(),
        },
    };

    match &outcome {
        PrecheckOutcome::Succeeded => {}
        PrecheckOutcome::Failed { code } => warn!(
            "command '{} {}' failed (exit code {:?})",
            helper.display(),
            text_dir.display(),
            code
        ),
        PrecheckOutcome::NotLaunched { reason } => warn!(
            "command '{} {}' failed: {}",
            helper.display(),
            text_dir.display(),
            reason
        ),
    }

    outcome
}
