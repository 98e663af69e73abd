use glossa_ecs::components::{ImplicitSubject, Morphology as Resolved, Syntax, TokenData};
use glossa_ecs::SentenceWorld;
use glossa_morph::Morphology;
use glossa_protocol::{
    AnalysisResult, ArchivedLexicon, DependencyEdge, EntityId, Register, ResolvedToken, Span,
    TagSet, TokenSpan,
};

use crate::assemble::assemble;
use crate::propagate::propagate;
use crate::resolver::resolve_dependencies;

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub register: Register,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            register: Register::Standard,
        }
    }
}

/// The analysis pipeline: Candidate Assembly -> Constraint Propagation ->
/// Dependency Resolution -> validation systems -> `AnalysisResult`.
///
/// Holds only the shared read-only lexicon (plus the analyzer indices built
/// over it), so one Engine serves any number of concurrent passes; each
/// call owns its private sentence world.
pub struct Engine<'a> {
    morphology: Morphology<'a>,
    options: AnalysisOptions,
}

impl<'a> Engine<'a> {
    pub fn new(lexicon: &'a ArchivedLexicon, options: AnalysisOptions) -> Self {
        Self {
            morphology: Morphology::new(lexicon),
            options,
        }
    }

    pub fn lexicon(&self) -> &'a ArchivedLexicon {
        self.morphology.lexicon()
    }

    /// Analyze one tokenized sentence. Always returns a result; malformed
    /// input degrades to diagnostics, never to a crash.
    pub fn analyze(&self, tokens: &[TokenSpan<'_>]) -> AnalysisResult {
        let _pass = tracing::debug_span!("analyze", tokens = tokens.len()).entered();

        let mut world = SentenceWorld::new();
        let mut diagnostics = assemble(&mut world, &self.morphology, tokens);

        if world.is_empty() {
            return AnalysisResult {
                tokens: Vec::new(),
                root: None,
                edges: Vec::new(),
                diagnostics,
            };
        }

        diagnostics.extend(propagate(&mut world, self.lexicon()));

        let (root, resolver_diagnostics) = resolve_dependencies(&mut world, self.lexicon());
        diagnostics.extend(resolver_diagnostics);
        let fatal = diagnostics.iter().any(|d| d.is_fatal());

        if !fatal {
            diagnostics.extend(world.validate(self.lexicon(), self.options.register));
        }

        let mut resolved_tokens = Vec::with_capacity(world.len());
        for &entity in world.order() {
            let (text, span) = world
                .inner()
                .get::<&TokenData>(entity)
                .map(|t| (t.text.clone(), t.span))
                .unwrap_or_else(|_| (String::new(), Span::point(0)));
            let (lemma, tags) = world
                .inner()
                .get::<&Resolved>(entity)
                .map(|m| (m.lemma, m.tags))
                .unwrap_or((None, TagSet::empty()));
            let implicit = world.inner().get::<&ImplicitSubject>(entity).is_ok();
            resolved_tokens.push(ResolvedToken {
                text,
                span,
                lemma,
                tags,
                implicit,
            });
        }

        let mut edges = Vec::new();
        if !fatal {
            for (index, &entity) in world.order().iter().enumerate() {
                let Ok(syntax) = world.inner().get::<&Syntax>(entity) else {
                    continue;
                };
                let Some(head) = world.entity_id(syntax.head) else {
                    continue;
                };
                edges.push(DependencyEdge {
                    dependent: EntityId(index as u32),
                    head,
                    relation: syntax.relation,
                });
            }
        }

        let root = if fatal {
            None
        } else {
            root.and_then(|r| world.entity_id(r))
        };

        AnalysisResult {
            tokens: resolved_tokens,
            root,
            edges,
            diagnostics,
        }
    }
}
