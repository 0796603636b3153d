//! Currency relative strength from pairwise FX log returns.
//!
//! The pipeline is: aligned prices → [`compute_log_returns`] → per-currency
//! [`compute_strength`] → [`compute_cumulative_normalized`] over a window.

pub mod cumulative;
pub mod index;
pub mod model;
pub mod returns;
pub mod strength;

pub use cumulative::{compute_cumulative, compute_cumulative_normalized};
pub use index::PairIndex;
pub use model::{StrengthModel, Window};
pub use returns::{compute_log_returns, MAX_ABS_LOG_RETURN};
pub use strength::compute_strength;
