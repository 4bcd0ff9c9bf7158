use alloc::vec::Vec;

use crate::items::ensure_consecutive;
use crate::{Integer, ValidationError};

/// Merges internally consecutive index runs into one ascending list.
///
/// Runs are ordered by their first element and concatenated, skipping any value that is not
/// strictly greater than the last one emitted. Runs may overlap or leave gaps between them; this is
/// how two double-buffer windows are presented as a single list while a jump is in flight.
///
/// Empty runs are ignored. A run that is not consecutive is rejected.
pub fn merge_consecutive_runs(runs: &[&[Integer]]) -> Result<Vec<Integer>, ValidationError> {
    let mut sorted: Vec<&[Integer]> = Vec::with_capacity(runs.len());
    for run in runs.iter().copied().filter(|run| !run.is_empty()) {
        ensure_consecutive(run)?;
        sorted.push(run);
    }
    sorted.sort_by_key(|run| run[0]);

    let mut out: Vec<Integer> = Vec::with_capacity(sorted.iter().map(|run| run.len()).sum());
    for run in sorted {
        for &value in run {
            if out.last().is_none_or(|&last| last < value) {
                out.push(value);
            }
        }
    }
    Ok(out)
}
