use crate::components::TokenData;
use crate::SentenceWorld;
use glossa_morph::orthography::{phonetic_key, starts_with_plosive, starts_with_vowel};
use glossa_protocol::{Diagnostic, DiagnosticKind, Register};

/// Forms that drop their final ν outside retaining environments.
const FULL_FORMS: [&str; 4] = ["την", "στην", "δεν", "μην"];
/// Their truncated counterparts, which must keep ν before vowels/plosives.
/// τον/στον keep the ν in all environments in the modern standard, so the
/// neuter article το never enters this check.
const SHORT_FORMS: [&str; 4] = ["τη", "στη", "δε", "μη"];

/// Final-N sandhi over adjacent surface forms. The ν of certain function
/// words is retained only before vowels and plosives; formal register
/// permits retention everywhere but never excuses a missing ν.
pub fn check_sandhi(world: &SentenceWorld, register: Register) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let order = world.order();
    for pair in order.windows(2) {
        let Ok(current) = world.inner().get::<&TokenData>(pair[0]) else {
            continue;
        };
        let Ok(next) = world.inner().get::<&TokenData>(pair[1]) else {
            continue;
        };
        if current.text.is_empty() || next.text.is_empty() {
            continue;
        }

        let key = phonetic_key(&current.text);
        let retaining = starts_with_vowel(&next.text) || starts_with_plosive(&next.text);

        if FULL_FORMS.contains(&key.as_str()) && !retaining && register != Register::Formal {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SandhiViolation,
                Some(current.span),
                format!(
                    "Final ν of '{}' is dropped before '{}'",
                    current.text, next.text
                ),
            ));
        } else if SHORT_FORMS.contains(&key.as_str()) && retaining {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SandhiViolation,
                Some(current.span),
                format!(
                    "'{}' must keep its final ν before '{}'",
                    current.text, next.text
                ),
            ));
        }
    }

    diagnostics
}
