pub mod assemble;
pub mod constraints;
pub mod engine;
pub mod propagate;
pub mod resolver;

pub use constraints::{ConstraintGraph, ConstraintKind};
pub use engine::{AnalysisOptions, Engine};
