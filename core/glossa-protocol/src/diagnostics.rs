use alloc::string::String;
use core::fmt;

use crate::span::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// The sentence has no usable analysis beyond its diagnostics.
    Fatal,
}

/// Every rule violation the engine reports. Diagnostics never abort a pass;
/// a Fatal kind only voids the dependency tree of its own sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// The analyzer found no candidates for a token.
    LookupMiss,
    /// Constraint propagation emptied a candidate set; the entity was
    /// resolved by the deterministic fallback instead.
    AmbiguityUnresolved,
    /// Case/Gender/Number or Person/Number concord broken on an edge.
    AgreementViolation,
    /// A verb's argument structure is not satisfied by its edges.
    ValencyViolation,
    /// Final-N retained or dropped against the sandhi rule.
    SandhiViolation,
    /// Formal and colloquial register mixed in one sentence.
    StyleClash,
    /// Multi-token input with no finite verb to serve as root.
    MissingPredicate,
    /// The dependency structure is not a tree.
    CyclicDependency,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::LookupMiss => Severity::Warning,
            DiagnosticKind::AmbiguityUnresolved => Severity::Warning,
            DiagnosticKind::AgreementViolation => Severity::Error,
            DiagnosticKind::ValencyViolation => Severity::Warning,
            DiagnosticKind::SandhiViolation => Severity::Warning,
            DiagnosticKind::StyleClash => Severity::Warning,
            DiagnosticKind::MissingPredicate => Severity::Warning,
            DiagnosticKind::CyclicDependency => Severity::Fatal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Byte range of the offending entity or edge dependent, when one exists.
    pub span: Option<Span>,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind, span: Option<Span>, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            span,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(
                f,
                "{:?} [{}..{}]: {}",
                self.kind, span.start, span.end, self.message
            ),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}
