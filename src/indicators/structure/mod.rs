pub mod key_levels;
pub mod support_resistance;

pub use key_levels::calculate_key_levels;
pub use support_resistance::{
    calculate_support_resistance, cluster_levels, detect_swings, find_support_resistance,
    normalize_levels, score_levels,
};
