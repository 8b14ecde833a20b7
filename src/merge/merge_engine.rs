use crate::models::Transaction;

/// Combines per-source transaction lists into one list, newest first.
///
/// Every input list must already be sorted newest first; the lists are interleaved,
/// never re-sorted. On equal dates, earlier lists come before later ones.
pub fn combine_and_sort(transactions: Vec<Vec<Transaction>>) -> Vec<Transaction> {
    merge_sorted_by(transactions, Transaction::date)
}

/// Merges lists that are each sorted descending by `key` into one descending list.
///
/// Lists are folded pairwise from the left with a linear two-pointer merge, so the
/// total cost is bounded by the number of elements times the number of lists.
/// The merge is stable and left-biased: on equal keys the element from the earlier
/// list wins, and elements of the same list keep their relative order.
pub fn merge_sorted_by<T, K, F>(lists: Vec<Vec<T>>, key: F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    lists.into_iter().fold(Vec::new(), |merged, next| merge_two_by(merged, next, &key))
}

fn merge_two_by<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    if right.is_empty() {
        return left;
    }

    if left.is_empty() {
        return right;
    }

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(left_item), Some(right_item)) = (left.peek(), right.peek()) {
        let next = if key(left_item) >= key(right_item) {
            left.next()
        } else {
            right.next()
        };

        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);

    merged
}
