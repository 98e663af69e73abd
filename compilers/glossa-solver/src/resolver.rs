use glossa_ecs::components::{ImplicitSubject, Morphology as Resolved, TokenData};
use glossa_ecs::SentenceWorld;
use glossa_protocol::{
    ArchivedLexicon, DependencyRelation, Diagnostic, DiagnosticKind, PartOfSpeech, Span, TagSet,
};
use hecs::Entity;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;

#[derive(Debug, Clone, Copy)]
struct Info {
    pos: Option<PartOfSpeech>,
    tags: TagSet,
    implicit: bool,
    span: Span,
}

/// Builds the rooted dependency tree over the resolved entities.
///
/// Root is the first finite verb; a single-entity fragment is its own
/// root; a verbless multi-token sentence roots at its first nominal head
/// and is flagged `MissingPredicate`. Remaining entities attach by
/// nearest-governing-head heuristics; anything left over goes to the root
/// as `obl` so the tree has exactly one root.
///
/// Returns the root entity, or None when the edge set is cyclic; a cycle is
/// fatal for this sentence and no Syntax components are written.
pub fn resolve_dependencies(
    world: &mut SentenceWorld,
    lexicon: &ArchivedLexicon,
) -> (Option<Entity>, Vec<Diagnostic>) {
    let order: Vec<Entity> = world.order().to_vec();
    let n = order.len();
    if n == 0 {
        return (None, Vec::new());
    }

    let infos: Vec<Info> = order
        .iter()
        .map(|&entity| {
            let tags = world
                .inner()
                .get::<&Resolved>(entity)
                .map(|m| m.tags)
                .unwrap_or_else(|_| TagSet::empty());
            let pos = world
                .inner()
                .get::<&Resolved>(entity)
                .ok()
                .and_then(|m| m.lemma)
                .and_then(|id| lexicon.lemma(id))
                .map(|l| l.pos.to_native());
            let implicit = world.inner().get::<&ImplicitSubject>(entity).is_ok();
            let span = world
                .inner()
                .get::<&TokenData>(entity)
                .map(|t| t.span)
                .unwrap_or(Span::point(0));
            Info {
                pos,
                tags,
                implicit,
                span,
            }
        })
        .collect();

    let mut diagnostics = Vec::new();

    let root = match infos.iter().position(|i| i.tags.is_finite_verb()) {
        Some(r) => r,
        None if n == 1 => 0,
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::MissingPredicate,
                Some(infos[0].span),
                "No finite verb to serve as clause root".to_string(),
            ));
            infos
                .iter()
                .position(|i| {
                    matches!(i.pos, Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun))
                })
                .unwrap_or(0)
        }
    };
    let root_is_verb = infos[root].tags.is_finite_verb();

    let next_noun_head = |from: usize| {
        (from + 1..n).find(|&j| {
            matches!(
                infos[j].pos,
                Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun | PartOfSpeech::Numeral)
            )
        })
    };
    let next_nominal = |from: usize| (from + 1..n).find(|&j| infos[j].tags.is_nominal());

    let mut edges: Vec<(usize, usize, DependencyRelation)> = Vec::new();
    let mut open_preposition: Option<usize> = None;
    let mut last_nominal: Option<usize> = None;

    for i in 0..n {
        let info = infos[i];
        let noun_like = matches!(
            info.pos,
            Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun | PartOfSpeech::Numeral)
        );
        if i == root {
            if noun_like {
                last_nominal = Some(i);
            }
            continue;
        }
        if info.implicit {
            edges.push((i, root, DependencyRelation::Nsubj));
            continue;
        }

        match info.pos {
            Some(PartOfSpeech::Article) => {
                // Determiners attach to the next nominal head in line.
                let head = next_noun_head(i).or_else(|| next_nominal(i));
                match head {
                    Some(j) if j != i => edges.push((i, j, DependencyRelation::Det)),
                    _ => edges.push((i, root, DependencyRelation::Obl)),
                }
            }
            Some(PartOfSpeech::Adjective) => match next_noun_head(i).or(last_nominal) {
                Some(j) if j != i => edges.push((i, j, DependencyRelation::Amod)),
                _ => edges.push((i, root, DependencyRelation::Obl)),
            },
            Some(PartOfSpeech::Preposition) => {
                edges.push((i, root, DependencyRelation::Obl));
                open_preposition = Some(i);
            }
            _ if noun_like && !info.tags.is_empty() => {
                if let Some(prep) = open_preposition.take() {
                    // Complement closes the open prepositional phrase.
                    edges.push((i, prep, DependencyRelation::Obl));
                } else if info.tags.contains(TagSet::NOMINATIVE) && root_is_verb {
                    edges.push((i, root, DependencyRelation::Nsubj));
                } else if info.tags.contains(TagSet::ACCUSATIVE) && root_is_verb {
                    edges.push((i, root, DependencyRelation::Obj));
                } else if info.tags.contains(TagSet::GENITIVE) {
                    match last_nominal {
                        // Adnominal genitive hangs off the nominal it follows.
                        Some(j) => edges.push((i, j, DependencyRelation::Obl)),
                        None => edges.push((i, root, DependencyRelation::Iobj)),
                    }
                } else {
                    edges.push((i, root, DependencyRelation::Obl));
                }
                last_nominal = Some(i);
            }
            // Adverbs, particles, conjunctions, subordinate verbs, unknowns.
            _ => edges.push((i, root, DependencyRelation::Obl)),
        }
    }

    // The result must be a tree: no entity may be its own ancestor.
    let mut check: DiGraph<(), ()> = DiGraph::new();
    let nodes: Vec<_> = (0..n).map(|_| check.add_node(())).collect();
    for &(dependent, head, _) in &edges {
        check.add_edge(nodes[dependent], nodes[head], ());
    }
    if is_cyclic_directed(&check) {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::CyclicDependency,
            None,
            "Dependency edges form a cycle; no usable tree for this sentence".to_string(),
        ));
        return (None, diagnostics);
    }

    for (dependent, head, relation) in edges {
        world.set_dependency(order[dependent], order[head], relation);
    }

    (Some(order[root]), diagnostics)
}
