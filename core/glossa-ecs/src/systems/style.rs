use crate::components::{Morphology, TokenData};
use crate::SentenceWorld;
use glossa_protocol::{ArchivedLexicon, Diagnostic, DiagnosticKind, Register};

/// Register mixing: a sentence that reaches for a katharevousa form and a
/// colloquialism at once gets flagged, whatever the pass register is.
pub fn check_style(world: &SentenceWorld, lexicon: &ArchivedLexicon) -> Vec<Diagnostic> {
    let mut formal: Option<String> = None;
    let mut colloquial: Option<(String, glossa_protocol::Span)> = None;

    for (_id, (morph, token)) in world.inner().query::<(&Morphology, &TokenData)>().iter() {
        let Some(lemma_id) = morph.lemma else {
            continue;
        };
        let Some(lemma) = lexicon.lemma(lemma_id) else {
            continue;
        };
        if lemma.register == Register::Formal && formal.is_none() {
            formal = Some(token.text.clone());
        } else if lemma.register == Register::Colloquial && colloquial.is_none() {
            colloquial = Some((token.text.clone(), token.span));
        }
    }

    match (formal, colloquial) {
        (Some(formal_text), Some((colloquial_text, span))) => vec![Diagnostic::new(
            DiagnosticKind::StyleClash,
            Some(span),
            format!("Formal '{formal_text}' mixed with colloquial '{colloquial_text}'"),
        )],
        _ => Vec::new(),
    }
}
