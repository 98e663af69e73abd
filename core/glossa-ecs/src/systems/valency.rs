use crate::components::{Morphology, Syntax, TokenData};
use crate::SentenceWorld;
use glossa_protocol::{
    ArchivedLexicon, DependencyRelation, Diagnostic, DiagnosticKind, Valency, Voice,
};

/// Argument-structure check: does each finite verb carry the edges its
/// lemma demands?
///
/// Voice is read through `syntactic_voice`, so deponents are treated as
/// active and still expect their object, while a true passive has its
/// object promoted away and is exempt.
pub fn check_valency(world: &SentenceWorld, lexicon: &ArchivedLexicon) -> Vec<Diagnostic> {
    let mut edges: Vec<(hecs::Entity, DependencyRelation)> = Vec::new();
    for (_id, syntax) in world.inner().query::<&Syntax>().iter() {
        edges.push((syntax.head, syntax.relation));
    }

    let mut diagnostics = Vec::new();

    for (entity, (morph, token)) in world.inner().query::<(&Morphology, &TokenData)>().iter() {
        if !morph.tags.is_finite_verb() {
            continue;
        }
        let Some(lemma_id) = morph.lemma else {
            continue;
        };
        let Some(lemma) = lexicon.lemma(lemma_id) else {
            continue;
        };
        if morph.tags.syntactic_voice() == Some(Voice::Passive) {
            continue;
        }

        let objects = edges
            .iter()
            .filter(|(head, rel)| *head == entity && *rel == DependencyRelation::Obj)
            .count();
        let indirect = edges
            .iter()
            .filter(|(head, rel)| *head == entity && *rel == DependencyRelation::Iobj)
            .count();

        if lemma.valency == Valency::Transitive && objects == 0 {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValencyViolation,
                Some(token.span),
                format!("Transitive verb '{}' has no object", token.text),
            ));
        } else if lemma.valency == Valency::Intransitive && objects > 0 {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValencyViolation,
                Some(token.span),
                format!("Intransitive verb '{}' takes no object", token.text),
            ));
        } else if lemma.valency == Valency::Ditransitive && (objects == 0 || indirect == 0) {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ValencyViolation,
                Some(token.span),
                format!(
                    "Ditransitive verb '{}' is missing an object or recipient",
                    token.text
                ),
            ));
        }
    }

    diagnostics
}
