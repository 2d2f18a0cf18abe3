pub mod engine;
pub mod method;
pub mod methods;
pub mod normalize;
pub mod rank;
pub mod types;
pub mod validation;

pub use engine::{compute_all_results, compute_results, compute_results_by_id};
pub use method::Method;
pub use rank::rank_results;
pub use types::*;
pub use validation::validate_dataset;
