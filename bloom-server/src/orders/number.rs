//! Order number generation
//!
//! Order numbers are the customer-facing token, distinct from the record
//! id: `FL-20260307-A3K9`. Date prefix keeps them roughly sortable and easy
//! to read over the phone; the random suffix makes same-day collisions
//! unlikely but not impossible — allocation always goes through the retry
//! loop in [`crate::orders::OrderService`].

use rand::Rng;

/// Suffix alphabet without the look-alikes (no O/0, I/1)
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const SUFFIX_LEN: usize = 4;

/// Generate a candidate order number. Pure draw, no I/O, cheap to call in a
/// loop; uniqueness is the caller's problem.
pub fn generate_order_number() -> String {
    let date = chrono::Utc::now().format("%Y%m%d");
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("FL-{date}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn number_has_expected_shape() {
        let number = generate_order_number();
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "FL");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn tight_loop_is_overwhelmingly_unique() {
        // 32^4 ≈ 1M suffixes per day; 1000 draws should effectively never
        // repeat. A couple of birthday collisions are tolerated so the test
        // is not flaky.
        let numbers: HashSet<String> = (0..1000).map(|_| generate_order_number()).collect();
        assert!(numbers.len() >= 998, "too many collisions: {}", numbers.len());
    }
}
