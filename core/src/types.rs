use ndarray::Array2;

/// Single coordinate axis used for board width and height.
pub type Coord = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Board dimensions `(width, height)`.
pub type Coord2 = (Coord, Coord);

/// Linear position on the board, `row * width + column`.
pub type CellIndex = usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Grid shape for a `(width, height)` pair, rows first.
    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Translates linear cell indices into row-major grid positions.
pub trait LinearIndexExt {
    fn nd_index(&self, index: CellIndex) -> Option<[usize; 2]>;
}

impl<T> LinearIndexExt for Array2<T> {
    fn nd_index(&self, index: CellIndex) -> Option<[usize; 2]> {
        let (rows, columns) = self.dim();
        if columns == 0 || index >= rows * columns {
            return None;
        }
        Some([index / columns, index % columns])
    }
}

/// Index of the cell directly above `index`, if there is one.
pub const fn cell_above(index: CellIndex, width: Coord) -> Option<CellIndex> {
    index.checked_sub(width as CellIndex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nd_index_is_row_major() {
        let size: Coord2 = (8, 6);
        let grid: Array2<u8> = Array2::default(size.to_nd_index());

        assert_eq!(grid.dim(), (6, 8));
        assert_eq!(grid.nd_index(0), Some([0, 0]));
        assert_eq!(grid.nd_index(7), Some([0, 7]));
        assert_eq!(grid.nd_index(8), Some([1, 0]));
        assert_eq!(grid.nd_index(47), Some([5, 7]));
        assert_eq!(grid.nd_index(48), None);
    }

    #[test]
    fn cell_above_stops_at_top_row() {
        assert_eq!(cell_above(3, 8), None);
        assert_eq!(cell_above(8, 8), Some(0));
        assert_eq!(cell_above(21, 10), Some(11));
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(8, 6), 48);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
