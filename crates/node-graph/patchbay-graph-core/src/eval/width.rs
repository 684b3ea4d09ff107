//! Broadcasting width and grouping rules shared across node kernels.

use patchbay_spread_core::Spread;

/// Rounding policy for vector-grouped widths.
///
/// The choice is per node, not universal: `Floor` consumes whole groups
/// only, `Ceil` also covers a trailing partial group, whose missing
/// components wrap around cyclically into earlier data. Every shipped
/// kernel uses `Ceil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRounding {
    Floor,
    Ceil,
}

/// Maximum length across `inputs`, never less than one group's worth.
///
/// Even when every input is empty the driver still produces one degenerate
/// group; empty reads fall back to `0.0` rather than crashing.
pub fn max_input_len<'a, I>(inputs: I) -> usize
where
    I: IntoIterator<Item = &'a Spread>,
{
    inputs
        .into_iter()
        .map(Spread::len)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Number of logical groups covered by `max_len` flat scalars.
pub fn group_count(max_len: usize, group_size: usize, rounding: GroupRounding) -> usize {
    match rounding {
        GroupRounding::Floor => max_len / group_size,
        GroupRounding::Ceil => max_len.div_ceil(group_size),
    }
}

/// Cyclic scalar read with the documented zero-length fallback.
pub fn read_scalar(spread: &Spread, index: usize) -> f64 {
    spread.get(index).unwrap_or(0.0)
}

/// Cyclic vector read with the documented zero-length fallback.
pub fn read_vec3(spread: &Spread, group: usize) -> [f64; 3] {
    spread.get_group::<3>(group).unwrap_or([0.0; 3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_covers_the_longest_input() {
        let a = Spread::from_slice(&[1.0, 2.0]);
        let b = Spread::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(max_input_len([&a, &b]), 5);
    }

    #[test]
    fn width_is_one_group_even_for_empty_inputs() {
        let a = Spread::new();
        let b = Spread::new();
        assert_eq!(max_input_len([&a, &b]), 1);
    }

    #[test]
    fn grouping_rounds_per_policy() {
        assert_eq!(group_count(7, 3, GroupRounding::Floor), 2);
        assert_eq!(group_count(7, 3, GroupRounding::Ceil), 3);
        assert_eq!(group_count(9, 3, GroupRounding::Floor), 3);
        assert_eq!(group_count(9, 3, GroupRounding::Ceil), 3);
        assert_eq!(group_count(1, 3, GroupRounding::Ceil), 1);
    }

    #[test]
    fn guarded_reads_substitute_zero() {
        let empty = Spread::new();
        assert_eq!(read_scalar(&empty, 7), 0.0);
        assert_eq!(read_vec3(&empty, 7), [0.0, 0.0, 0.0]);
    }
}
