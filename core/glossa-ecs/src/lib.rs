pub mod components;
pub mod systems;

use hecs::{Entity, World};

use components::{Candidates, ImplicitSubject, Morphology, Syntax, TokenData, Unknown};
use glossa_protocol::{
    ArchivedLexicon, Candidate, DependencyRelation, Diagnostic, EntityId, Register, Span, TagSet,
};

/// Per-sentence entity arena. Entities are dense ids into hecs' own column
/// storage; `order` preserves token order and doubles as the [`EntityId`]
/// index space. The world is private to one analysis pass and discarded
/// once the result is materialized.
pub struct SentenceWorld {
    world: World,
    order: Vec<Entity>,
}

impl SentenceWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            order: Vec::new(),
        }
    }

    /// Expose the inner hecs World for the solver systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn inner_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Add a word to the sentence. An empty candidate set marks the token
    /// as Unknown, which propagates as a wildcard.
    pub fn push_token(&mut self, text: String, span: Span, candidates: Vec<Candidate>) -> Entity {
        let entity = if candidates.is_empty() {
            self.world
                .spawn((TokenData { text, span }, Candidates::new(candidates), Unknown))
        } else {
            self.world
                .spawn((TokenData { text, span }, Candidates::new(candidates)))
        };
        self.order.push(entity);
        entity
    }

    /// Synthesize the pro-drop subject marker at byte offset `at`.
    pub fn push_implicit_subject(&mut self, tags: TagSet, at: usize) -> Entity {
        let entity = self.world.spawn((
            TokenData {
                text: String::new(),
                span: Span::point(at),
            },
            Morphology { lemma: None, tags },
            ImplicitSubject,
        ));
        self.order.push(entity);
        entity
    }

    /// Entities in token order; the position in this slice is the entity's
    /// dense [`EntityId`].
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn entity_id(&self, entity: Entity) -> Option<EntityId> {
        self.order
            .iter()
            .position(|e| *e == entity)
            .map(|i| EntityId(i as u32))
    }

    /// Define the syntactic tree structure
    pub fn set_dependency(&mut self, child: Entity, head: Entity, relation: DependencyRelation) {
        // We use insert_one to add the Syntax component to an existing Entity
        let _ = self.world.insert_one(child, Syntax { head, relation });
    }

    /// Write the resolved reading for an entity.
    pub fn resolve(&mut self, entity: Entity, morphology: Morphology) {
        let _ = self.world.insert_one(entity, morphology);
    }

    /// Run all validation systems over the resolved tree.
    pub fn validate(&self, lexicon: &ArchivedLexicon, register: Register) -> Vec<Diagnostic> {
        let mut diagnostics = systems::agreement::check_agreement(self);
        diagnostics.extend(systems::valency::check_valency(self, lexicon));
        diagnostics.extend(systems::euphony::check_sandhi(self, register));
        diagnostics.extend(systems::style::check_style(self, lexicon));
        tracing::debug!(count = diagnostics.len(), "validation systems finished");
        diagnostics
    }
}

impl Default for SentenceWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{
        DiagnosticKind, Gender, Lemma, LemmaId, Lexicon, Paradigm, ParadigmId, PartOfSpeech,
        Valency,
    };

    fn resolved(tags: TagSet) -> Morphology {
        Morphology { lemma: None, tags }
    }

    #[test]
    fn test_agreement_check() {
        let mut world = SentenceWorld::new();

        // "τα παιδιά τρέχει" (Mismatch: Plural Subject, Singular Verb)

        let verb = world.push_token("τρέχει".to_string(), Span::new(10, 16), Vec::new());
        world.resolve(
            verb,
            resolved(TagSet::THIRD_PERSON | TagSet::SINGULAR | TagSet::INDICATIVE),
        );

        let subject = world.push_token("παιδιά".to_string(), Span::new(3, 9), Vec::new());
        world.resolve(
            subject,
            resolved(TagSet::NOMINATIVE | TagSet::NEUTER | TagSet::PLURAL),
        );

        world.set_dependency(subject, verb, DependencyRelation::Nsubj);

        let errors = systems::agreement::check_agreement(&world);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::AgreementViolation);
        assert!(errors[0].message.contains("Number mismatch"));
    }

    #[test]
    fn sandhi_respects_register() {
        let mut world = SentenceWorld::new();
        // γ is neither a vowel nor a plosive: the ν of "την" must drop.
        world.push_token("την".to_string(), Span::new(0, 6), Vec::new());
        world.push_token("γυναίκα".to_string(), Span::new(7, 21), Vec::new());

        let informal = systems::euphony::check_sandhi(&world, Register::Standard);
        assert_eq!(informal.len(), 1);
        assert_eq!(informal[0].kind, DiagnosticKind::SandhiViolation);

        let formal = systems::euphony::check_sandhi(&world, Register::Formal);
        assert!(formal.is_empty());
    }

    #[test]
    fn sandhi_requires_retention_before_plosives() {
        let mut world = SentenceWorld::new();
        // π is a plosive: "τη πόλη" is missing its ν in every register.
        world.push_token("τη".to_string(), Span::new(0, 4), Vec::new());
        world.push_token("πόλη".to_string(), Span::new(5, 13), Vec::new());

        let diagnostics = systems::euphony::check_sandhi(&world, Register::Formal);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("must keep"));
    }

    #[test]
    fn transitive_verb_without_object_is_flagged() {
        let lexicon = Lexicon {
            version: 1,
            lemmas: vec![Lemma {
                id: LemmaId(0),
                text: "διαβάζω".to_string(),
                stems: vec!["διαβάζ".to_string()],
                paradigm: ParadigmId(0),
                pos: PartOfSpeech::Verb,
                gender: Gender::Neuter,
                freq_rank: 0,
                valency: Valency::Transitive,
                register: glossa_protocol::Register::Standard,
                deponent: false,
                governs: 0,
            }],
            paradigms: vec![Paradigm {
                id: ParadigmId(0),
                pos: PartOfSpeech::Verb,
                endings: Vec::new(),
            }],
        };
        let bytes = rkyv::to_bytes::<_, 1024>(&lexicon).unwrap();
        let archived = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();

        let mut world = SentenceWorld::new();
        let verb = world.push_token("διαβάζω".to_string(), Span::new(0, 14), Vec::new());
        world.resolve(
            verb,
            Morphology {
                lemma: Some(LemmaId(0)),
                tags: TagSet::FIRST_PERSON
                    | TagSet::SINGULAR
                    | TagSet::IMPERFECTIVE
                    | TagSet::NONPAST
                    | TagSet::ACTIVE
                    | TagSet::INDICATIVE,
            },
        );

        let diagnostics = systems::valency::check_valency(&world, archived);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ValencyViolation);
    }
}
