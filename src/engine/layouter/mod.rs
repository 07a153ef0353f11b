pub mod fit;

pub use fit::{FitConstraints, FitError, WrapResult, candidate_sizes, resolve};
