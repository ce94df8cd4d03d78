/// A raster-order lattice iterator that yields `(x, y, pixel_idx)` tuples.
///
/// With a stride of 1 it visits every pixel row-major, which is the scan
/// order error diffusion depends on. With a larger stride it visits the
/// top-left corner of every *complete* `stride × stride` cell; partial cells
/// on the right and bottom edges are never yielded.
#[derive(Debug, Clone, Copy)]
pub struct GridIterator {
    width: usize,
    stride: usize,
    columns: usize,
    rows: usize,
    column: usize,
    row: usize,
}

impl GridIterator {
    /// Every pixel of a `width × height` grid.
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self::cells(width, height, 1)
    }

    /// Every complete `stride × stride` cell of a `width × height` grid.
    #[inline]
    pub const fn cells(width: usize, height: usize, stride: usize) -> Self {
        let (columns, rows) = match stride {
            0 => (0, 0),
            _ => (width / stride, height / stride),
        };
        Self {
            width,
            stride,
            columns,
            rows,
            column: 0,
            row: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.row >= self.rows || self.columns == 0 {
            return 0;
        }
        (self.rows - self.row) * self.columns - self.column
    }
}

impl Iterator for GridIterator {
    type Item = (usize, usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.rows || self.columns == 0 {
            return None;
        }

        let x = self.column * self.stride;
        let y = self.row * self.stride;
        let result = (x, y, y * self.width + x);

        self.column += 1;
        if self.column >= self.columns {
            self.column = 0;
            self.row += 1;
        }

        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIterator {
    #[inline]
    fn len(&self) -> usize {
        self.remaining()
    }
}
