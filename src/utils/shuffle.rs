use rand::Rng;

/// Fisher-Yates shuffle of answer options that keeps the correct-answer index
/// in sync with the move of the originally-correct option.
///
/// `correct_answer` values outside the slice are passed through untouched so
/// downstream validation can reject them.
pub fn shuffle_answers(options: &mut [String], correct_answer: usize) -> usize {
    let mut rng = rand::thread_rng();
    let mut correct = correct_answer;

    for i in (1..options.len()).rev() {
        let j = rng.gen_range(0..=i);
        options.swap(i, j);
        if correct == i {
            correct = j;
        } else if correct == j {
            correct = i;
        }
    }

    correct
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn options() -> Vec<String> {
        vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
            "delta".to_string(),
        ]
    }

    #[test]
    fn preserves_option_multiset_and_correct_identity() {
        for original_correct in 0..4 {
            for _ in 0..50 {
                let mut opts = options();
                let new_correct = shuffle_answers(&mut opts, original_correct);

                let mut sorted = opts.clone();
                sorted.sort();
                assert_eq!(sorted, options());
                assert_eq!(opts[new_correct], options()[original_correct]);
            }
        }
    }

    #[test]
    fn every_position_is_reachable() {
        let mut seen: BTreeMap<usize, u32> = BTreeMap::new();
        for _ in 0..400 {
            let mut opts = options();
            let correct = shuffle_answers(&mut opts, 0);
            *seen.entry(correct).or_default() += 1;
        }
        assert_eq!(seen.len(), 4, "correct answer never landed on {:?}", seen);
    }

    #[test]
    fn out_of_range_index_passes_through() {
        let mut opts = options();
        assert_eq!(shuffle_answers(&mut opts, 9), 9);
    }
}
