//! Level-based point grants.
//!
//! The cadence: nothing before level 10, then one Talent point on odd
//! levels and one Class point on even levels. Multi-level jumps split the
//! post-10 difference, rounding the remainder toward Class.

/// Points granted for a level change, as `(talent, class)`.
///
/// `old_level` must be below `new_level`; callers guard against downlevels.
pub fn level_up_grants(old_level: u8, new_level: u8) -> (u32, u32) {
    if new_level < 10 {
        return (0, 0);
    }

    let mut diff = u32::from(new_level.saturating_sub(old_level));
    if old_level < 10 && diff > 1 {
        diff -= u32::from(9 - old_level);
    }

    if diff > 1 {
        let div = diff / 2;
        let rem = diff % 2;
        (div, div + rem)
    } else if new_level % 2 == 1 {
        (1, 0)
    } else {
        (0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_below_level_ten() {
        assert_eq!(level_up_grants(1, 2), (0, 0));
        assert_eq!(level_up_grants(8, 9), (0, 0));
    }

    #[test]
    fn single_levels_alternate_talent_and_class() {
        assert_eq!(level_up_grants(9, 10), (0, 1));
        assert_eq!(level_up_grants(10, 11), (1, 0));
        assert_eq!(level_up_grants(11, 12), (0, 1));
        assert_eq!(level_up_grants(78, 79), (1, 0));
    }

    #[test]
    fn multi_level_jumps_split_the_difference() {
        // 4 levels past the threshold: two of each.
        assert_eq!(level_up_grants(20, 24), (2, 2));
        // Odd jumps round the remainder toward class.
        assert_eq!(level_up_grants(20, 25), (2, 3));
    }

    #[test]
    fn jumps_across_the_threshold_only_count_levels_past_nine() {
        // 5 → 12 crosses the gate; the pre-10 levels grant nothing.
        assert_eq!(level_up_grants(5, 12), (1, 2));
    }
}
