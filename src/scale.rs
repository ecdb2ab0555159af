//! Ordinal point scale
//!
//! Maps a discrete index domain onto evenly spaced points across a
//! continuous range, leaving `padding` step units of outer space split
//! between both ends.

/// Precomputed index -> coordinate mapping
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    points: Vec<f64>,
}

impl PointScale {
    /// Build a scale over `0..count` spread across `[start, stop]`
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let (start, stop) = range;

        if count == 0 {
            return Self { points: Vec::new() };
        }

        // A single point sits in the middle of the range
        if count < 2 {
            return Self {
                points: vec![(start + stop) / 2.0],
            };
        }

        let step = (stop - start) / (count as f64 - 1.0 + padding);
        let first = start + step * padding / 2.0;
        let points = (0..count).map(|i| first + i as f64 * step).collect();

        Self { points }
    }

    /// Coordinate for `index`, if it is in the domain
    pub fn at(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl PointScale {
        fn points(&self) -> &[f64] {
            &self.points
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_six_points_with_padding() {
        let scale = PointScale::new(6, (0.0, 500.0), 1.0);
        let expected = [
            500.0 / 12.0,
            125.0,
            500.0 * 5.0 / 12.0,
            500.0 * 7.0 / 12.0,
            375.0,
            500.0 * 11.0 / 12.0,
        ];

        assert_eq!(scale.points().len(), 6);
        for (i, want) in expected.iter().enumerate() {
            assert!(approx(scale.at(i).unwrap(), *want), "index {} was {:?}", i, scale.at(i));
        }
        assert!(approx(scale.at(1).unwrap() - scale.at(0).unwrap(), 500.0 / 6.0));
    }

    #[test]
    fn test_points_are_symmetric() {
        let scale = PointScale::new(6, (0.0, 500.0), 1.0);
        let first = scale.at(0).unwrap();
        let last = scale.at(5).unwrap();
        assert!(approx(first, 500.0 - last));
    }

    #[test]
    fn test_zero_padding_touches_edges() {
        let scale = PointScale::new(3, (0.0, 100.0), 0.0);
        assert_eq!(scale.points(), &[0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = PointScale::new(0, (0.0, 500.0), 1.0);
        assert!(empty.points().is_empty());
        assert_eq!(empty.at(0), None);

        let single = PointScale::new(1, (0.0, 500.0), 1.0);
        assert_eq!(single.points(), &[250.0]);
    }

    #[test]
    fn test_out_of_domain() {
        let scale = PointScale::new(6, (0.0, 500.0), 1.0);
        assert_eq!(scale.at(6), None);
    }
}
