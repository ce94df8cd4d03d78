/// Expand a square tile into `tile_side` full-width rows so per-pixel
/// lookups become a plain slice index.
///
/// Row `y` of the result holds `tile[y][x % tile_side]` for `x` in
/// `0..row_size`, and a pixel at `(x, y)` reads its value from row
/// `y % tile_side`.
pub fn precompute_tiled_rows<T, MapFn>(tile_side: usize, row_size: usize, map: MapFn) -> Vec<T>
where
    MapFn: Fn(usize, usize) -> T,
{
    let mut cache = Vec::with_capacity(tile_side * row_size);
    for y in 0..tile_side {
        for x in 0..row_size {
            cache.push(map(x % tile_side, y));
        }
    }
    cache
}

#[cfg(test)]
mod tests {
    use super::precompute_tiled_rows;

    #[test]
    fn test_precompute_tiled_rows_wraps_columns() {
        let tile = [[0, 1], [2, 3]];
        let buf = precompute_tiled_rows(2, 5, |x, y| tile[y][x]);
        assert_eq!(buf, vec![0, 1, 0, 1, 0, 2, 3, 2, 3, 2]);
    }

    #[test]
    fn test_precompute_tiled_rows_narrow_row() {
        let buf = precompute_tiled_rows(4, 1, |x, y| (x, y));
        assert_eq!(buf, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }
}
