//! Rahu and Ketu, the Moon's ascending and descending nodes.
//!
//! Mean node is the Delaunay Ω argument. The true node adds the five
//! largest periodic corrections from Meeus, "Astronomical Algorithms"
//! (2nd ed), Chapter 47. Ketu is always Rahu + 180°.

use gochara_frames::{fundamental_arguments, normalize_360};
use serde::{Deserialize, Serialize};

/// Which node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarNode {
    Rahu,
    Ketu,
}

/// Mean (smooth) or true (perturbed) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMode {
    #[default]
    Mean,
    True,
}

/// Mean Rahu longitude in degrees [0, 360), `t` in Julian centuries (TT).
pub fn mean_rahu_deg(t: f64) -> f64 {
    fundamental_arguments(t).omega
}

/// True Rahu longitude in degrees [0, 360).
pub fn true_rahu_deg(t: f64) -> f64 {
    let a = fundamental_arguments(t);
    let (d, m, mp, f) = (
        a.d.to_radians(),
        a.m.to_radians(),
        a.m_moon.to_radians(),
        a.f.to_radians(),
    );
    let corr = -1.4979 * (2.0 * (d - f)).sin() - 0.1500 * m.sin()
        + 0.1226 * (2.0 * d).sin()
        + 0.1176 * (2.0 * f).sin()
        - 0.0801 * (2.0 * (mp - f)).sin();
    normalize_360(a.omega + corr)
}

/// Node longitude in degrees [0, 360).
pub fn lunar_node_deg(node: LunarNode, t: f64, mode: NodeMode) -> f64 {
    let rahu = match mode {
        NodeMode::Mean => mean_rahu_deg(t),
        NodeMode::True => true_rahu_deg(t),
    };
    match node {
        LunarNode::Rahu => rahu,
        LunarNode::Ketu => normalize_360(rahu + 180.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gochara_frames::circular_distance;

    #[test]
    fn mean_node_at_j2000() {
        assert!((mean_rahu_deg(0.0) - 125.04452).abs() < 1e-9);
    }

    #[test]
    fn mean_node_regresses() {
        // ~19.34°/yr retrograde
        let one_year = 365.25 / 36_525.0;
        let delta = circular_distance(mean_rahu_deg(one_year), mean_rahu_deg(0.0));
        assert!((delta + 19.34).abs() < 0.05, "delta = {delta}");
    }

    #[test]
    fn meeus_example_47a_true_node_within_tolerance() {
        // 1992 April 12, 0h TD: mean Ω = 274.400656, true node ≈ 274.4 ± 1.7
        let t = -0.077_221_081_451;
        assert!((mean_rahu_deg(t) - 274.400_656).abs() < 1e-3);
        let diff = circular_distance(true_rahu_deg(t), mean_rahu_deg(t));
        assert!(diff.abs() < 2.0);
    }

    #[test]
    fn ketu_is_opposite() {
        for mode in [NodeMode::Mean, NodeMode::True] {
            let r = lunar_node_deg(LunarNode::Rahu, 0.3, mode);
            let k = lunar_node_deg(LunarNode::Ketu, 0.3, mode);
            assert!((circular_distance(k, r).abs() - 180.0).abs() < 1e-9);
        }
    }
}
