// Shell sort with the halving gap sequence len/2, len/4, ..., 1.

use super::Stepper;
use crate::error::SortResult;

pub(super) async fn sort(steps: &mut Stepper<'_>) -> SortResult<()> {
    let len = steps.len();
    let mut gap = len / 2;

    while gap != 0 {
        for start in 0..len - gap {
            let end = start + gap;
            if !steps.greater(start, end)? {
                continue;
            }
            steps.swap(start, end).await?;

            // Walk the smaller element back through its gapped chain
            let mut current = start;
            while current >= gap && steps.greater(current - gap, current)? {
                steps.swap(current - gap, current).await?;
                current -= gap;
            }
        }
        gap /= 2;
    }
    Ok(())
}
