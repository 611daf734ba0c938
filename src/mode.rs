use crate::ChainingHashMap;

/// Finds the most frequent values of a sequence.
///
/// Returns every value reaching the highest occurrence count, in no particular
/// order, together with that count. An empty sequence yields `(vec![], 0)`.
///
/// ```rust
/// use hashmaps::find_mode;
///
/// let (mut mode, frequency) = find_mode(["apple", "apple", "grape", "melon", "melon", "peach"]);
/// mode.sort();
/// assert_eq!(mode, vec!["apple", "melon"]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
pub fn find_mode<I>(values: I) -> (Vec<String>, usize)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut counts: ChainingHashMap<usize> = ChainingHashMap::default();
    let mut max_frequency = 0;

    for value in values {
        let key = value.as_ref();
        let frequency = counts.get(key).map_or(1, |count| count.saturating_add(1));
        counts.put(key, frequency);
        max_frequency = max_frequency.max(frequency);
    }

    let mode = counts
        .iter()
        .filter(|&(_, &count)| count == max_frequency)
        .map(|(key, _)| key.to_owned())
        .collect();

    (mode, max_frequency)
}
