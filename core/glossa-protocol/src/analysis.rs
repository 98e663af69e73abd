use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::diagnostics::Diagnostic;
use crate::ids::{EntityId, LemmaId};
use crate::span::Span;
use crate::tags::TagSet;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One morphological reading of a surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Candidate {
    pub lemma: LemmaId,
    pub tags: TagSet,
}

impl Candidate {
    pub const fn new(lemma: LemmaId, tags: TagSet) -> Self {
        Self { lemma, tags }
    }
}

/// A word token as delivered by the tokenizer: raw text slice plus its byte
/// range in the sentence. Punctuation never reaches the engine.
#[derive(Debug, Clone, Copy)]
pub struct TokenSpan<'a> {
    pub text: &'a str,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[repr(u8)]
pub enum DependencyRelation {
    Nsubj = 0,
    Obj = 1,
    Iobj = 2,
    Obl = 3,
    Det = 4,
    Amod = 5,
}

impl DependencyRelation {
    /// Universal Dependencies label.
    pub fn as_label(&self) -> &'static str {
        match self {
            DependencyRelation::Nsubj => "nsubj",
            DependencyRelation::Obj => "obj",
            DependencyRelation::Iobj => "iobj",
            DependencyRelation::Obl => "obl",
            DependencyRelation::Det => "det",
            DependencyRelation::Amod => "amod",
        }
    }
}

impl fmt::Display for DependencyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// `head` is a lookup key into the same sentence arena as `dependent`;
/// an edge never owns the entities it points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct DependencyEdge {
    pub dependent: EntityId,
    pub head: EntityId,
    pub relation: DependencyRelation,
}

/// Final state of one entity after disambiguation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ResolvedToken {
    pub text: String,
    pub span: Span,
    /// None for out-of-vocabulary tokens.
    pub lemma: Option<LemmaId>,
    pub tags: TagSet,
    /// True for the synthesized pro-drop subject marker.
    pub implicit: bool,
}

/// Product of one analysis pass. Immutable after construction; produced for
/// every tokenizable input, possibly carrying only diagnostics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct AnalysisResult {
    pub tokens: Vec<ResolvedToken>,
    /// Index of the tree root; None when no usable tree exists.
    pub root: Option<EntityId>,
    pub edges: Vec<DependencyEdge>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn diagnostics_of(
        &self,
        kind: crate::diagnostics::DiagnosticKind,
    ) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}
