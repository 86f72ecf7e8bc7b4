//! Period-over-period progress deltas
//!
//! Computes a second difference: the change in progress since the last run,
//! and the change of that change against the delta stored with the last
//! run. Both are rounded to 1 significant digit, matching how the values
//! were stored historically.

use crate::history::HistoryRecord;
use crate::rounding::round_sig;
use crate::types::DeltaResult;

/// Significant digits used for both delta values
const DELTA_SIG_FIGS: u32 = 1;

/// Computes the progress deltas against the most recent history record
///
/// Returns `None` when there is no prior record; the report then omits the
/// "progress since last execution" field entirely.
///
/// The two subtractions are deliberately separate steps: the second operand
/// of the second difference is the *stored* delta of the previous record,
/// not a recomputed one.
pub fn compute_delta(current_progress_pct: f64, last: Option<&HistoryRecord>) -> Option<DeltaResult> {
    let last = last?;

    let progress_delta_pct = round_sig(current_progress_pct - last.progress_pct, DELTA_SIG_FIGS);
    let progress_delta_of_delta =
        round_sig(progress_delta_pct - last.progress_delta_pct, DELTA_SIG_FIGS);

    Some(DeltaResult {
        progress_delta_pct,
        progress_delta_of_delta,
    })
}
