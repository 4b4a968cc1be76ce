//! Edge length for the force layout, derived from an edge's distance basis.

use super::Edge;

/// Base distance unit the basis is scaled by.
pub const DEFAULT_DISTANCE_UNIT: f64 = 100.0;
/// Node radius added to every link so circles never overlap at rest.
pub const DEFAULT_RADIUS: f64 = 10.0;

/// Desired layout length for a link with the given distance basis.
///
/// The scaled basis is damped by its natural log so very dissimilar pairs don't
/// stretch the layout. When the log is not finite (basis of zero) the factor falls
/// back to 1.
pub fn link_distance(distance_basis: f64, unit: f64, radius: f64) -> f64 {
    let scaled = distance_basis * unit;
    let factor = scaled.ln();
    let factor = if factor.is_finite() { factor } else { 1.0 };
    scaled * factor + radius
}

impl Edge {
    /// Layout length of this edge, see [`link_distance`].
    pub fn link_distance(&self, unit: f64, radius: f64) -> f64 {
        link_distance(self.distance_basis, unit, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(basis: f64) -> f64 {
        link_distance(basis, DEFAULT_DISTANCE_UNIT, DEFAULT_RADIUS)
    }

    #[test]
    fn test_zero_basis_falls_back_to_radius() {
        let value = d(0.0);
        assert!(value.is_finite());
        assert!(value > 0.0);
        assert!((value - DEFAULT_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // 0.5 * 100 = 50; 50 * ln(50) + 10
        let expected = 50.0 * 50f64.ln() + 10.0;
        assert!((d(0.5) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_full_dissimilarity() {
        let expected = 100.0 * 100f64.ln() + 10.0;
        assert!((d(1.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_small_basis_stays_positive() {
        // ln is negative below a scaled value of 1 but finite, so it is kept.
        let value = d(0.005);
        let expected = 0.5 * 0.5f64.ln() + 10.0;
        assert!((value - expected).abs() < 1e-12);
        assert!(value > 0.0);
    }

    #[test]
    fn test_monotone_above_inverse_e() {
        let start = 1.0 / std::f64::consts::E;
        let steps = 200;
        let mut previous = d(start + 1e-9);
        for i in 1..=steps {
            let basis = start + (1.0 - start) * i as f64 / steps as f64;
            let current = d(basis);
            assert!(current >= previous, "not monotone at basis {}", basis);
            previous = current;
        }
    }

    #[test]
    fn test_edge_link_distance_uses_basis() {
        let edge = Edge {
            source_index: 0,
            target_index: 1,
            key: "b".to_string(),
            distance_basis: 0.25,
        };
        assert_eq!(edge.link_distance(100.0, 10.0), link_distance(0.25, 100.0, 10.0));
    }

    #[test]
    fn test_custom_unit_and_radius() {
        let expected = 0.5 * 200.0 * (100f64).ln() + 4.0;
        assert!((link_distance(0.5, 200.0, 4.0) - expected).abs() < 1e-9);
    }
}
