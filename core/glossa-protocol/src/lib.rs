#![no_std] // Critical for WASM/Embedded compatibility

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod analysis;
pub mod diagnostics;
pub mod ids;
pub mod lexicon;
pub mod span;
pub mod tags;

// Re-export core types for convenience
pub use analysis::*;
pub use diagnostics::*;
pub use ids::{EntityId, LemmaId, ParadigmId, SentenceId};
pub use lexicon::*;
pub use span::Span;
pub use tags::*;
