use glossa_protocol::{Candidate, DependencyRelation, LemmaId, Span, TagSet};
use hecs::Entity;

/// Basic data about the token (Source of Truth)
#[derive(Debug, Clone)]
pub struct TokenData {
    pub text: String,
    pub span: Span,
}

/// The set of morphological readings still in play for one entity.
/// Starts as the full analyzer output and only ever shrinks.
#[derive(Debug, Clone)]
pub struct Candidates {
    pub set: Vec<Candidate>,
}

impl Candidates {
    pub fn new(set: Vec<Candidate>) -> Self {
        Self { set }
    }

    pub fn is_resolved(&self) -> bool {
        self.set.len() == 1
    }
}

/// The single reading an entity resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Morphology {
    /// None for out-of-vocabulary tokens and the implicit subject.
    pub lemma: Option<LemmaId>,
    pub tags: TagSet,
}

/// Out-of-vocabulary marker. An Unknown entity propagates as a wildcard:
/// it satisfies every constraint instead of blocking the sentence.
#[derive(Debug, Clone, Copy)]
pub struct Unknown;

/// Marker for the synthesized pro-drop subject.
#[derive(Debug, Clone, Copy)]
pub struct ImplicitSubject;

/// The Syntactic Tree Structure
#[derive(Debug, Clone, Copy)]
pub struct Syntax {
    /// The parent node in the dependency tree. A lookup key into the same
    /// world, never an ownership relation.
    pub head: Entity,
    pub relation: DependencyRelation,
}
