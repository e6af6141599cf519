//! Distance estimates used to rank boards in the cost-ordered strategies.
//!
//! The estimate for a board is the sum, over its well-formed colors, of the Manhattan
//! distance between the two endpoints. Colors that no longer occupy exactly two cells
//! contribute nothing.
use crate::board::EndpointPair;

/// Manhattan distance between two `(row, col)` cells.
///
/// # Examples
/// ```
/// use flow_solver::heuristics::manhattan_distance;
/// assert_eq!(manhattan_distance((0, 0), (2, 1)), 3);
/// assert_eq!(manhattan_distance((4, 4), (1, 4)), 3);
/// ```
pub fn manhattan_distance(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Sums the endpoint distances of the given pairs.
///
/// An empty slice sums to zero.
pub fn pair_distance_sum(pairs: &[EndpointPair]) -> u32 {
    pairs
        .iter()
        .map(|pair| manhattan_distance(pair.first, pair.second))
        .sum()
}
