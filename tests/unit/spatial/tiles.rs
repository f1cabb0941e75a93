//! Tests for pattern construction and symmetry transforms

#[cfg(test)]
mod tests {

    use wavetile::spatial::tiles::{Color, Pattern};

    const R: Color = [255, 0, 0];
    const G: Color = [0, 255, 0];
    const B: Color = [0, 0, 255];
    const W: Color = [255, 255, 255];

    // R G
    // B W
    fn corners() -> Pattern {
        Pattern::from_pixels(2, vec![R, G, B, W]).unwrap()
    }

    #[test]
    fn test_from_pixels_rejects_wrong_length() {
        assert!(Pattern::from_pixels(2, vec![R, G, B]).is_none());
        assert!(Pattern::from_pixels(0, vec![]).is_none());
        assert!(Pattern::from_pixels(1, vec![R]).is_some());
    }

    #[test]
    fn test_get_reads_column_then_row() {
        let pattern = corners();
        assert_eq!(pattern.get(0, 0), R);
        assert_eq!(pattern.get(1, 0), G);
        assert_eq!(pattern.get(0, 1), B);
        assert_eq!(pattern.get(1, 1), W);
        assert_eq!(pattern.top_left(), R);
    }

    #[test]
    fn test_get_out_of_range_is_black() {
        assert_eq!(corners().get(2, 0), [0, 0, 0]);
        assert_eq!(corners().get(0, 5), [0, 0, 0]);
    }

    #[test]
    fn test_from_fn_matches_from_pixels() {
        let colors = [[R, G], [B, W]];
        let built = Pattern::from_fn(2, |x, y| colors[y][x]);
        assert_eq!(built, corners());
    }

    // Tests clockwise rotation moves the bottom-left pixel to the top-left
    // Verified by swapping the rotation coordinates
    #[test]
    fn test_rotate_90_clockwise() {
        let rotated = corners().rotate_90();
        // B R
        // W G
        assert_eq!(rotated.pixels(), &[B, R, W, G]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let pattern = Pattern::from_fn(3, |x, y| [x as u8, y as u8, 0]);
        let back = pattern.rotate_90().rotate_90().rotate_90().rotate_90();
        assert_eq!(back, pattern);
    }

    #[test]
    fn test_reflect_mirrors_columns() {
        let reflected = corners().reflect();
        assert_eq!(reflected.pixels(), &[G, R, W, B]);
        assert_eq!(reflected.reflect(), corners());
    }

    #[test]
    fn test_variant_counts() {
        let pattern = corners();
        assert_eq!(pattern.variants(false, false).len(), 1);
        assert_eq!(pattern.variants(true, false).len(), 4);
        assert_eq!(pattern.variants(false, true).len(), 2);
        assert_eq!(pattern.variants(true, true).len(), 8);
    }

    // Tests all eight variants of an asymmetric block are distinct
    #[test]
    fn test_variants_of_asymmetric_block_are_distinct() {
        let variants = corners().variants(true, true);
        assert_eq!(variants.first(), Some(&corners()));
        for (i, a) in variants.iter().enumerate() {
            for b in variants.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_uniform_block_variants_are_identical() {
        let flat = Pattern::from_fn(3, |_, _| W);
        assert!(flat.variants(true, true).iter().all(|v| *v == flat));
    }
}
