use rand::distr::Alphanumeric;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// returns a random integer between `min` and `max`, both inclusive
///
/// swapped bounds are tolerated
pub fn int_in_range(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::rng().random_range(lo..=hi)
}

/// picks a random element, `None` when the slice is empty
pub fn pick<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::rng())
}

pub fn shuffle<T>(items: &mut [T]) {
    items.shuffle(&mut rand::rng());
}

/// random `[A-Za-z0-9]` string of exactly `len` characters
pub fn alphanumeric_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// random `#RRGGBB` color string
pub fn hex_color() -> String {
    format!("#{:06X}", rand::rng().random_range(0..=0xFFFFFFu32))
}

/// true with a probability of `percent` out of 100
pub fn chance(percent: u8) -> bool {
    let percent = percent.min(100);
    rand::rng().random_range(0..100) < u32::from(percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_in_range_stays_in_bounds() {
        for _ in 0..200 {
            let n = int_in_range(-3, 7);
            assert!((-3..=7).contains(&n));
        }
    }

    #[test]
    fn int_in_range_swapped_bounds() {
        for _ in 0..200 {
            let n = int_in_range(7, -3);
            assert!((-3..=7).contains(&n));
        }
    }

    #[test]
    fn int_in_range_single_value() {
        assert_eq!(int_in_range(4, 4), 4);
    }

    #[test]
    fn pick_empty_is_none() {
        let empty: [u8; 0] = [];
        assert!(pick(&empty).is_none());
    }

    #[test]
    fn pick_returns_member() {
        let items = ["red", "green", "blue"];
        let picked = pick(&items).unwrap();
        assert!(items.contains(picked));
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut items = vec![1, 2, 3, 4, 5, 6, 7, 8];
        shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn alphanumeric_string_length_and_charset() {
        let s = alphanumeric_string(32);
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn alphanumeric_string_empty() {
        assert_eq!(alphanumeric_string(0), "");
    }

    #[test]
    fn hex_color_shape() {
        let color = hex_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn chance_extremes() {
        for _ in 0..50 {
            assert!(!chance(0));
            assert!(chance(100));
            // clamped, not panicking
            assert!(chance(255));
        }
    }
}
