use std::collections::VecDeque;

use glossa_ecs::components::{Candidates, Morphology as Resolved, TokenData};
use glossa_ecs::SentenceWorld;
use glossa_protocol::{
    ArchivedLexicon, Candidate, Diagnostic, DiagnosticKind, Span, TagSet,
};
use hecs::Entity;

use crate::constraints::{compatible, ConstraintGraph, ConstraintKind};

/// Arc-consistency fixpoint over the constraint graph, then mood
/// tie-breaking, deterministic selection and pro-drop synthesis.
///
/// Candidate sets only ever shrink and are finite, so the worklist drains.
/// A wipeout is never silently accepted: the entity gets an
/// `AmbiguityUnresolved` diagnostic, its pre-propagation set back, and is
/// locked out of further pruning so the pass still terminates with exactly
/// one resolved reading per entity.
pub fn propagate(world: &mut SentenceWorld, lexicon: &ArchivedLexicon) -> Vec<Diagnostic> {
    let graph = ConstraintGraph::build(world, lexicon);
    let order: Vec<Entity> = world.order().to_vec();

    let snapshot: Vec<Vec<Candidate>> = order
        .iter()
        .map(|&e| candidate_set(world, e))
        .collect();

    let mut locked = vec![false; order.len()];
    let mut diagnostics = Vec::new();
    let mut worklist: VecDeque<_> = graph.edge_indices().collect();
    let mut revisions = 0usize;

    while let Some(edge) = worklist.pop_front() {
        let (source, target, kind) = graph.edge(edge);

        for revise_source in [true, false] {
            let revised = if revise_source { source } else { target };
            if locked[revised] {
                continue;
            }
            if !revise(world, lexicon, kind, &order, source, target, revise_source) {
                continue;
            }
            revisions += 1;

            if candidate_set(world, order[revised]).is_empty() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::AmbiguityUnresolved,
                    span_of(world, order[revised]),
                    format!(
                        "No reading of '{}' satisfies all constraints",
                        text_of(world, order[revised]),
                    ),
                ));
                restore(world, order[revised], &snapshot[revised]);
                locked[revised] = true;
            } else {
                for &incident in graph.touching(revised) {
                    if incident != edge {
                        worklist.push_back(incident);
                    }
                }
            }
        }
    }

    tracing::debug!(revisions, "constraint propagation reached fixpoint");

    mood_tiebreak(world, lexicon, &order);
    select(world, lexicon, &order);
    synthesize_prodrop(world);

    diagnostics
}

/// Drop candidates at one endpoint that have no supporting candidate at
/// the other endpoint under the edge's predicate. Returns true when the
/// set shrank. An empty support side (Unknown or wiped-out entity) is a
/// wildcard and prunes nothing.
fn revise(
    world: &SentenceWorld,
    lexicon: &ArchivedLexicon,
    kind: ConstraintKind,
    order: &[Entity],
    source: usize,
    target: usize,
    revise_source: bool,
) -> bool {
    let (revised, support) = if revise_source {
        (order[source], order[target])
    } else {
        (order[target], order[source])
    };

    let support_set = candidate_set(world, support);
    if support_set.is_empty() {
        return false;
    }

    let Ok(mut candidates) = world.inner().get::<&mut Candidates>(revised) else {
        return false;
    };
    let before = candidates.set.len();
    candidates.set.retain(|c| {
        support_set.iter().any(|s| {
            if revise_source {
                compatible(lexicon, kind, c, s)
            } else {
                compatible(lexicon, kind, s, c)
            }
        })
    });
    candidates.set.len() != before
}

/// Structural pruning cannot separate Indicative from Subjunctive when the
/// surface forms coincide; the preceding particle decides. A verb in the
/// scope of a mood governor (να, ας) keeps Subjunctive readings, a bare
/// verb keeps Indicative ones.
fn mood_tiebreak(world: &mut SentenceWorld, lexicon: &ArchivedLexicon, order: &[Entity]) {
    let n = order.len();
    let mut governed = vec![false; n];

    for i in 0..n {
        let set = candidate_set(world, order[i]);
        let governs_mood = set.iter().any(|c| {
            lexicon
                .lemma(c.lemma)
                .map(|l| l.governs().intersects(TagSet::MOODS))
                .unwrap_or(false)
        });
        if !governs_mood {
            continue;
        }
        if let Some(j) = (i + 1..n).find(|&j| {
            candidate_set(world, order[j])
                .iter()
                .any(|c| c.tags.is_finite_verb())
        }) {
            governed[j] = true;
        }
    }

    for j in 0..n {
        let Ok(mut candidates) = world.inner().get::<&mut Candidates>(order[j]) else {
            continue;
        };
        let has_indicative = candidates
            .set
            .iter()
            .any(|c| c.tags.contains(TagSet::INDICATIVE));
        let has_subjunctive = candidates
            .set
            .iter()
            .any(|c| c.tags.contains(TagSet::SUBJUNCTIVE));
        if !(has_indicative && has_subjunctive) {
            continue;
        }
        let dropped = if governed[j] {
            TagSet::INDICATIVE
        } else {
            TagSet::SUBJUNCTIVE
        };
        candidates.set.retain(|c| !c.tags.contains(dropped));
    }
}

/// Deterministic fallback order: corpus frequency rank, then lemma id,
/// then raw tag bits. Every entity leaves with exactly one resolved
/// reading; Unknown entities resolve to an empty TagSet.
fn select(world: &mut SentenceWorld, lexicon: &ArchivedLexicon, order: &[Entity]) {
    let mut resolved: Vec<(Entity, Resolved)> = Vec::with_capacity(order.len());

    for &entity in order {
        let set = candidate_set(world, entity);
        let reading = set
            .iter()
            .min_by_key(|c| {
                let rank = lexicon
                    .lemma(c.lemma)
                    .map(|l| l.freq_rank)
                    .unwrap_or(u32::MAX);
                (rank, c.lemma.0, c.tags.bits())
            })
            .copied();
        resolved.push((
            entity,
            match reading {
                Some(c) => Resolved {
                    lemma: Some(c.lemma),
                    tags: c.tags,
                },
                None => Resolved {
                    lemma: None,
                    tags: TagSet::empty(),
                },
            },
        ));
    }

    for (entity, morphology) in resolved {
        world.resolve(entity, morphology);
    }
}

/// Pro-drop: a finite verb with no Nominative anywhere in the sentence
/// gets a synthesized implicit-subject entity carrying its Person/Number,
/// rather than leaving the nsubj edge absent.
fn synthesize_prodrop(world: &mut SentenceWorld) {
    let mut has_nominative = false;
    let mut verb: Option<(TagSet, usize)> = None;

    for &entity in world.order() {
        let Ok(morph) = world.inner().get::<&Resolved>(entity) else {
            continue;
        };
        if morph.tags.is_nominal() && morph.tags.contains(TagSet::NOMINATIVE) {
            has_nominative = true;
        }
        if verb.is_none() && morph.tags.is_finite_verb() {
            let at = world
                .inner()
                .get::<&TokenData>(entity)
                .map(|t| t.span.start)
                .unwrap_or(0);
            verb = Some((morph.tags, at));
        }
    }

    if has_nominative {
        return;
    }
    let Some((verb_tags, at)) = verb else {
        return;
    };

    let tags = TagSet::NOMINATIVE
        | (verb_tags & TagSet::PERSONS)
        | (verb_tags & TagSet::NUMBERS);
    world.push_implicit_subject(tags, at);
    tracing::debug!("synthesized implicit subject");
}

fn candidate_set(world: &SentenceWorld, entity: Entity) -> Vec<Candidate> {
    world
        .inner()
        .get::<&Candidates>(entity)
        .map(|c| c.set.clone())
        .unwrap_or_default()
}

fn restore(world: &SentenceWorld, entity: Entity, snapshot: &[Candidate]) {
    if let Ok(mut candidates) = world.inner().get::<&mut Candidates>(entity) {
        candidates.set = snapshot.to_vec();
    }
}

fn span_of(world: &SentenceWorld, entity: Entity) -> Option<Span> {
    world
        .inner()
        .get::<&TokenData>(entity)
        .ok()
        .map(|t| t.span)
}

fn text_of(world: &SentenceWorld, entity: Entity) -> String {
    world
        .inner()
        .get::<&TokenData>(entity)
        .map(|t| t.text.clone())
        .unwrap_or_default()
}
