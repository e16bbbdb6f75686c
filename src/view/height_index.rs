//! Row heights with O(log n) offsets via a Fenwick tree.
//!
//! Every row of the list occupies `1 + panel height` lines. The index maps a
//! row to its top line and a scroll offset back to the row under it.

use crate::model::Position;

/// Prefix sums over per-row line heights.
#[derive(Debug, Clone)]
pub struct HeightIndex {
    tree: Vec<isize>,
    heights: Vec<u16>,
}

impl HeightIndex {
    /// Index of `len` rows, each `height` lines tall.
    ///
    /// ```
    /// # use slidex::view::HeightIndex;
    /// # use slidex::model::Position;
    /// let index = HeightIndex::uniform(3, 1);
    /// assert_eq!(index.total(), 3);
    /// assert_eq!(index.offset_of(Position::new(2)), 2);
    /// ```
    pub fn uniform(len: usize, height: u16) -> Self {
        let mut index = Self {
            tree: vec![0; len],
            heights: vec![0; len],
        };
        for row in 0..len {
            index.set(Position::new(row), height);
        }
        index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Whether the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of `pos` in lines, `0` past the end.
    pub fn height(&self, pos: Position) -> u16 {
        self.heights.get(pos.get()).copied().unwrap_or(0)
    }

    /// Change the height of `pos`. Rows past the end are ignored.
    pub fn set(&mut self, pos: Position, height: u16) {
        let Some(current) = self.heights.get_mut(pos.get()) else {
            return;
        };
        let delta = height as isize - *current as isize;
        *current = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, pos.get(), delta);
        }
    }

    /// Lines above `pos`: the offset of its first line.
    ///
    /// Positions past the end report the total height.
    pub fn offset_of(&self, pos: Position) -> usize {
        match pos.get().min(self.len()) {
            0 => 0,
            row => self.inclusive_sum(row - 1),
        }
    }

    /// Total height of all rows.
    pub fn total(&self) -> usize {
        self.offset_of(Position::new(self.len()))
    }

    /// Row containing line `offset`, or `None` past the last line.
    ///
    /// ```
    /// # use slidex::view::HeightIndex;
    /// # use slidex::model::Position;
    /// let mut index = HeightIndex::uniform(3, 1);
    /// index.set(Position::new(0), 4); // lines 0..4
    /// assert_eq!(index.row_at(3), Some(Position::new(0)));
    /// assert_eq!(index.row_at(4), Some(Position::new(1)));
    /// assert_eq!(index.row_at(6), None);
    /// ```
    pub fn row_at(&self, offset: usize) -> Option<Position> {
        let mut left = 0;
        let mut right = self.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.inclusive_sum(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        (left < self.len()).then(|| Position::new(left))
    }

    fn inclusive_sum(&self, row: usize) -> usize {
        let sum = fenwick::array::prefix_sum(&self.tree, row);
        usize::try_from(sum).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_index_has_no_rows() {
        let index = HeightIndex::uniform(0, 1);

        assert!(index.is_empty());
        assert_eq!(index.total(), 0);
        assert_eq!(index.row_at(0), None);
    }

    #[test]
    fn set_updates_offsets_of_following_rows() {
        let mut index = HeightIndex::uniform(5, 1);

        index.set(Position::new(1), 6);

        assert_eq!(index.offset_of(Position::new(1)), 1);
        assert_eq!(index.offset_of(Position::new(2)), 7);
        assert_eq!(index.total(), 10);
    }

    #[test]
    fn set_past_end_is_ignored() {
        let mut index = HeightIndex::uniform(2, 1);

        index.set(Position::new(9), 5);

        assert_eq!(index.total(), 2);
        assert_eq!(index.height(Position::new(9)), 0);
    }

    #[test]
    fn shrinking_a_row_moves_later_rows_up() {
        let mut index = HeightIndex::uniform(3, 1);
        index.set(Position::new(0), 5);

        index.set(Position::new(0), 1);

        assert_eq!(index.offset_of(Position::new(2)), 2);
        assert_eq!(index.row_at(1), Some(Position::new(1)));
    }

    proptest! {
        #[test]
        fn offsets_match_naive_sums(heights in prop::collection::vec(0u16..8, 1..40)) {
            let mut index = HeightIndex::uniform(heights.len(), 1);
            for (row, &h) in heights.iter().enumerate() {
                index.set(Position::new(row), h);
            }

            let mut running = 0usize;
            for (row, &h) in heights.iter().enumerate() {
                prop_assert_eq!(index.offset_of(Position::new(row)), running);
                if h > 0 {
                    prop_assert_eq!(index.row_at(running), Some(Position::new(row)));
                }
                running += usize::from(h);
            }
            prop_assert_eq!(index.total(), running);
        }
    }
}
