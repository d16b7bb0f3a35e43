// Quick sort: Lomuto partition with the last element of each range as pivot.

use super::Stepper;
use crate::error::SortResult;

/// Partition `start..=end` around `bars[end]` and return the pivot's final
/// position. Elements strictly less than the pivot move to the low side.
async fn partition(steps: &mut Stepper<'_>, start: usize, end: usize) -> SortResult<usize> {
    let pivot = steps.get(end)?;
    let mut store = start;

    for j in start..end {
        if steps.less_than(j, pivot)? {
            steps.swap(store, j).await?;
            store += 1;
        }
    }

    steps.swap(store, end).await?;
    Ok(store)
}

/// Ranges are kept on an explicit stack and popped low side first, which
/// visits them in the same order as the recursive formulation.
pub(super) async fn sort(steps: &mut Stepper<'_>) -> SortResult<()> {
    let len = steps.len();
    if len < 2 {
        return Ok(());
    }

    let mut pending = vec![(0, len - 1)];
    while let Some((start, end)) = pending.pop() {
        let pivot = partition(steps, start, end).await?;

        // Ranges of length <= 1 are already in place
        if pivot + 1 < end {
            pending.push((pivot + 1, end));
        }
        if pivot > start + 1 {
            pending.push((start, pivot - 1));
        }
    }
    Ok(())
}
