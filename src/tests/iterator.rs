#[cfg(test)]
mod iterator_tests {
    use crate::{tests::utils::TEST_IMAGE_SIZE, utils::iterator::GridIterator};

    fn missing_pixel(data: &[bool], width: usize) -> bool {
        let missed_pixel = data.iter().position(|val| !*val);
        if let Some(pixel) = missed_pixel {
            println!("missed pixel {}: {} {}", pixel, pixel % width, pixel / width);
        }
        missed_pixel.is_some()
    }

    #[test]
    fn test_grid_iterator_visits_indices() {
        let (width, height) = (TEST_IMAGE_SIZE, TEST_IMAGE_SIZE / 2 + 3);
        let mut visit = vec![false; width * height];
        let mut previous = None;
        for (x, y, idx) in GridIterator::new(width, height) {
            assert_eq!(width * y + x, idx, "1D pixel index missmatches 2D coordinates");
            assert!(!visit[idx], "Pixel visited twice");
            if let Some(prev) = previous {
                assert_eq!(prev + 1, idx, "pixels must be visited in raster order");
            }
            visit[idx] = true;
            previous = Some(idx);
        }
        assert!(!missing_pixel(&visit, width), "Pixel not visited");
    }

    #[test]
    fn test_grid_iterator_len() {
        let mut iter = GridIterator::new(7, 5);
        assert_eq!(iter.len(), 35);
        iter.nth(9);
        assert_eq!(iter.len(), 25);
        assert_eq!(iter.count(), 25);
    }

    #[test]
    fn test_cells_skip_partial_edges() {
        let cells: Vec<_> = GridIterator::cells(10, 9, 4).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 0), (4, 0, 4), (0, 4, 40), (4, 4, 44)]
        );
        assert_eq!(GridIterator::cells(3, 3, 4).count(), 0);
        assert_eq!(GridIterator::cells(8, 8, 0).count(), 0);
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(GridIterator::new(0, 10).count(), 0);
        assert_eq!(GridIterator::new(10, 0).len(), 0);
    }
}
