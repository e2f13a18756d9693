#![forbid(unsafe_code)]

//! Solved-state detection.
//!
//! A puzzle is solved exactly when a single group holds every piece. Because
//! groups only ever form through offset-preserving merges, that is enough:
//! piece positions are not re-checked against the grid.

use crate::group::GroupSet;
use crate::view::PieceId;

/// Stateless solved-state check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionChecker;

impl SolutionChecker {
    /// O(1): one group whose size is the piece count.
    pub fn is_solved(groups: &GroupSet) -> bool {
        let total = groups.piece_count();
        total > 0
            && groups.len() == 1
            && groups.iter().next().is_some_and(|(_, g)| g.len() == total)
    }

    /// O(n): the same answer, derived through the owner index.
    pub fn verify(groups: &GroupSet) -> bool {
        let mut owners = (0..groups.piece_count())
            .map(|i| groups.group_of(PieceId::new(i)));
        match owners.next() {
            Some(Some(first)) => owners.all(|o| o == Some(first)),
            _ => false,
        }
    }
}
