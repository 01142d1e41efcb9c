//! Mode finding on top of [`ChainingMap`]

use crate::ChainingMap;

/// Finds the most frequent value(s) of a sequence and how often they occur.
///
/// Values are counted in a default [`ChainingMap`]. Ties are reported in the table's
/// bucket order, which depends on the hash function rather than the input order. An
/// empty sequence has no mode and a frequency of 0.
///
/// ```rust
/// use primetable::find_mode;
///
/// let (modes, frequency) = find_mode(["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(modes, vec!["apple".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn find_mode<I>(values: I) -> (Vec<String>, usize)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut counts: ChainingMap<usize> = ChainingMap::default();
    for value in values {
        let value = value.as_ref();
        if counts.contains_key(value) {
            let count = counts.get(value).copied().unwrap_or(0);
            counts.put(value, count + 1);
        } else {
            counts.put(value, 1);
        }
    }

    let mut modes = Vec::new();
    let mut frequency = 0;
    for (value, count) in counts.get_keys_and_values() {
        if count > frequency {
            frequency = count;
            modes.clear();
            modes.push(value);
        } else if count == frequency {
            modes.push(value);
        }
    }

    (modes, frequency)
}
