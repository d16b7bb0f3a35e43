// Bubble sort with early exit once a full pass makes no swaps.

use super::Stepper;
use crate::error::SortResult;

pub(super) async fn sort(steps: &mut Stepper<'_>) -> SortResult<()> {
    let len = steps.len();
    let mut already_sorted = false;

    for i in 0..len.saturating_sub(1) {
        if already_sorted {
            break;
        }
        already_sorted = true;

        // The last `i` slots already hold the largest values
        for j in 0..len - 1 - i {
            if steps.greater(j, j + 1)? {
                already_sorted = false;
                steps.swap(j, j + 1).await?;
            }
        }
    }
    Ok(())
}
