// Insertion sort by adjacent swaps.

use super::Stepper;
use crate::error::SortResult;

pub(super) async fn sort(steps: &mut Stepper<'_>) -> SortResult<()> {
    let len = steps.len();

    for i in 1..len {
        let mut k = i;
        while k > 0 && steps.greater(k - 1, k)? {
            steps.swap(k, k - 1).await?;
            k -= 1;
        }
    }
    Ok(())
}
