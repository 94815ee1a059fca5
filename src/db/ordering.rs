/// Set each entry's position from where its id appears in `ids` (1-based).
///
/// Shared by the record collections and the nested dropdown lists. Ids that
/// match nothing are skipped; entries whose id is not listed are left alone.
/// Returns how many entries were touched.
pub fn reorder_by_ids<T, S, K, P>(entries: &mut [T], ids: &[S], key: K, mut set_position: P) -> usize
where
    S: AsRef<str>,
    K: Fn(&T) -> &str,
    P: FnMut(&mut T, i64),
{
    let mut touched = 0;
    for (index, id) in ids.iter().enumerate() {
        let position = index as i64 + 1;
        for entry in entries.iter_mut() {
            if key(entry) == id.as_ref() {
                set_position(entry, position);
                touched += 1;
            }
        }
    }
    touched
}

/// One past the highest order in use, never below 1.
pub fn next_position<I>(orders: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    orders.into_iter().max().unwrap_or(0).max(0) + 1
}
