//! Vedic reference quantities built on the frame and time helpers.
//!
//! This crate provides:
//! - Ayanamsha (sidereal offset) for the common sidereal systems
//! - Mean and true lunar node (Rahu/Ketu) longitudes
//! - Rashi (30° sign) lookup and DMS formatting
//! - Lagna (ascendant) longitude for a geographic location

pub mod ayanamsha;
pub mod lagna;
pub mod location;
pub mod lunar_nodes;
pub mod rashi;

pub use ayanamsha::{ALL_SYSTEMS, AyanamshaSystem, ayanamsha_deg};
pub use lagna::{ascendant_deg, ascendant_from_lst_deg};
pub use location::GeoLocation;
pub use lunar_nodes::{LunarNode, NodeMode, lunar_node_deg, mean_rahu_deg, true_rahu_deg};
pub use rashi::{ALL_RASHIS, Dms, RASHI_SPAN_DEG, Rashi, RashiInfo, deg_to_dms, rashi_from_longitude};
