//! Faker-style draws on an injected random source.

use rand::Rng;

/// Largest digit count [`random_number`] accepts; 10^19 - 1 still fits in a u64.
pub const MAX_DIGITS: u32 = 19;

/// A uniformly random number with up to `digits` decimal digits, i.e. in
/// `0..=10^digits - 1`. Zero digits always yields zero.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, digits: u32) -> u64 {
    let digits = digits.min(MAX_DIGITS);
    let upper = 10u64.pow(digits) - 1;
    rng.gen_range(0..=upper)
}

/// A uniformly chosen element of `elements`, or `None` when it is empty.
pub fn random_element<'a, R: Rng + ?Sized, T>(rng: &mut R, elements: &'a [T]) -> Option<&'a T> {
    if elements.is_empty() {
        None
    } else {
        Some(&elements[rng.gen_range(0..elements.len())])
    }
}
