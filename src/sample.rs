use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Record;
use crate::nutrients::RecipeCard;

/// How many recipes a sample request returns by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 6;

/// Random, non-repeating sample of up to `k` records, each annotated with
/// its display name and nutrient profile. An undersized or empty source is
/// not an error: the whole source comes back, shuffled.
pub fn sample_recipes(source: &[&Record], k: usize) -> Vec<RecipeCard> {
    sample_with_rng(source, k, &mut rand::thread_rng())
}

/// [`sample_recipes`] with a caller-supplied RNG, for deterministic tests.
/// Fisher-Yates over a copy of the source, so every permutation is equally
/// likely and the source order is untouched.
pub fn sample_with_rng<R: Rng + ?Sized>(
    source: &[&Record],
    k: usize,
    rng: &mut R,
) -> Vec<RecipeCard> {
    let mut pool: Vec<&Record> = source.to_vec();
    pool.shuffle(rng);
    pool.into_iter()
        .take(k)
        .map(RecipeCard::from_record)
        .collect()
}
