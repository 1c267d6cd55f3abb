use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::QuestionRecord;

/// Draw up to `count` distinct questions from the bank in random order.
pub fn pick_random_questions<R: Rng + ?Sized>(
    bank: &[QuestionRecord],
    count: usize,
    rng: &mut R,
) -> Vec<QuestionRecord> {
    let mut shuffled = bank.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::models::OptionLetter;

    fn bank(size: u64) -> Vec<QuestionRecord> {
        (1..=size)
            .map(|id| QuestionRecord {
                id,
                text: format!("question {id}"),
                options: BTreeMap::from([(OptionLetter::A, "a".to_string())]),
                correct: OptionLetter::A,
            })
            .collect()
    }

    #[test]
    fn test_picks_requested_count_without_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pick_random_questions(&bank(40), 25, &mut rng);
        assert_eq!(picked.len(), 25);

        let ids: HashSet<u64> = picked.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 25);
        assert!(ids.iter().all(|id| (1..=40).contains(id)));
    }

    #[test]
    fn test_small_bank_is_used_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = pick_random_questions(&bank(3), 25, &mut rng);
        let mut ids: Vec<u64> = picked.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_same_seed_same_exam() {
        let first = pick_random_questions(&bank(30), 10, &mut StdRng::seed_from_u64(42));
        let second = pick_random_questions(&bank(30), 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
