// Selection sort: move the maximum of the unsorted prefix to its end.

use super::Stepper;
use crate::error::SortResult;

pub(super) async fn sort(steps: &mut Stepper<'_>) -> SortResult<()> {
    let len = steps.len();

    for i in 0..len.saturating_sub(1) {
        let unsorted = len - i;

        // First maximum wins ties
        let mut index_max = 0;
        for j in 0..unsorted {
            if steps.greater(j, index_max)? {
                index_max = j;
            }
        }

        steps.swap(index_max, unsorted - 1).await?;
    }
    Ok(())
}
