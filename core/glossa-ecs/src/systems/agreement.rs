use crate::components::{Morphology, Syntax, TokenData};
use crate::SentenceWorld;
use glossa_protocol::{Diagnostic, DiagnosticKind, DependencyRelation, TagSet};

/// Concord checks over the resolved dependency tree.
///
/// Propagation already prefers consistent readings; what survives here is
/// genuine ill-formedness (or a fallback pick after a wipeout), reported
/// per category so a writing tool can show the exact mismatch.
pub fn check_agreement(world: &SentenceWorld) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (morph, syntax, token)) in world
        .inner()
        .query::<(&Morphology, &Syntax, &TokenData)>()
        .iter()
    {
        let Ok(head_morph) = world.inner().get::<&Morphology>(syntax.head) else {
            continue;
        };
        let head_text = world
            .inner()
            .get::<&TokenData>(syntax.head)
            .map(|t| t.text.clone())
            .unwrap_or_default();

        match syntax.relation {
            DependencyRelation::Det | DependencyRelation::Amod => {
                for (mask, label) in [
                    (TagSet::CASES, "Case"),
                    (TagSet::GENDERS, "Gender"),
                    (TagSet::NUMBERS, "Number"),
                ] {
                    if !morph.tags.agrees_on(head_morph.tags, mask) {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticKind::AgreementViolation,
                            Some(token.span),
                            format!(
                                "{label} mismatch on {} edge: '{}' {:?} vs '{}' {:?}",
                                syntax.relation,
                                token.text,
                                morph.tags & mask,
                                head_text,
                                head_morph.tags & mask,
                            ),
                        ));
                    }
                }
            }
            DependencyRelation::Nsubj => {
                // Nominal subjects without explicit Person count as third.
                let mut subject_person = morph.tags & TagSet::PERSONS;
                if subject_person.is_empty() && morph.tags.is_nominal() {
                    subject_person = TagSet::THIRD_PERSON;
                }
                let verb_person = head_morph.tags & TagSet::PERSONS;
                if !subject_person.is_empty()
                    && !verb_person.is_empty()
                    && subject_person != verb_person
                {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::AgreementViolation,
                        Some(token.span),
                        format!(
                            "Person mismatch on nsubj edge: '{}' {subject_person:?} vs '{head_text}' {verb_person:?}",
                            token.text,
                        ),
                    ));
                }
                if !morph.tags.agrees_on(head_morph.tags, TagSet::NUMBERS) {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::AgreementViolation,
                        Some(token.span),
                        format!(
                            "Number mismatch on nsubj edge: '{}' {:?} vs '{head_text}' {:?}",
                            token.text,
                            morph.tags & TagSet::NUMBERS,
                            head_morph.tags & TagSet::NUMBERS,
                        ),
                    ));
                }
            }
            _ => {}
        }
    }

    diagnostics
}
