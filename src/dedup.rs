use std::{collections::HashSet, hash::Hash};

use metrohash::MetroBuildHasher;

/// Removes later duplicates in place, keeping the first occurrence of every
/// value and the relative order of the survivors.
pub fn dedup_in_place<T>(items: &mut Vec<T>)
where
    T: Eq + Hash + Clone,
{
    if items.len() < 2 {
        return;
    }
    let mut seen = HashSet::with_capacity_and_hasher(items.len(), MetroBuildHasher::default());
    items.retain(|item| seen.insert(item.clone()));
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{pos, Pos};

    #[test]
    fn empty_and_single() {
        let mut empty: Vec<Pos> = vec![];
        dedup_in_place(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![pos!(1, 2)];
        dedup_in_place(&mut single);
        assert_eq!(single, vec![pos!(1, 2)]);
    }

    #[test]
    fn all_identical() {
        let mut items = vec![pos!(7, 7); 50];
        dedup_in_place(&mut items);
        assert_eq!(items, vec![pos!(7, 7)]);
    }

    #[test]
    fn keeps_first_seen_order() {
        let mut items = vec![
            pos!(2, 0),
            pos!(1, 0),
            pos!(2, 0),
            pos!(0, 0),
            pos!(1, 0),
            pos!(3, 0),
        ];
        dedup_in_place(&mut items);
        assert_eq!(items, vec![pos!(2, 0), pos!(1, 0), pos!(0, 0), pos!(3, 0)]);
    }

    proptest! {
        #[test]
        fn output_is_unique_ordered_subsequence(input in prop::collection::vec((-5i64..5, -5i64..5), 0..100)) {
            let input: Vec<Pos> = input.into_iter().map(|(x, y)| pos!(x, y)).collect();
            let mut output = input.clone();
            dedup_in_place(&mut output);

            for (i, a) in output.iter().enumerate() {
                prop_assert!(!output[i + 1..].contains(a));
            }

            // survivors appear in the order their first occurrence had in the input
            let mut expected = vec![];
            for pos in &input {
                if !expected.contains(pos) {
                    expected.push(*pos);
                }
            }
            prop_assert_eq!(output, expected);
        }
    }
}
