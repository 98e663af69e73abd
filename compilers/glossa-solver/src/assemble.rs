use glossa_ecs::SentenceWorld;
use glossa_morph::Morphology;
use glossa_protocol::{Diagnostic, DiagnosticKind, TokenSpan};

/// Candidate Assembly: one entity per word token, initial candidate set =
/// everything the analyzer accepts for that surface form.
///
/// A token with zero candidates becomes an Unknown wildcard and the
/// sentence keeps going; an isolated gap in the lexicon must never abort
/// the analysis of its neighbours.
pub fn assemble(
    world: &mut SentenceWorld,
    morphology: &Morphology<'_>,
    tokens: &[TokenSpan<'_>],
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for token in tokens {
        let candidates = morphology.analyze(token.text);
        tracing::trace!(
            token = token.text,
            readings = candidates.len(),
            "assembled entity"
        );
        if candidates.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::LookupMiss,
                Some(token.span),
                format!("Unknown token '{}'", token.text),
            ));
        }
        world.push_token(token.text.to_string(), token.span, candidates);
    }

    diagnostics
}
