use glossa_ecs::components::Candidates;
use glossa_ecs::SentenceWorld;
use glossa_protocol::{ArchivedLexicon, Candidate, PartOfSpeech, TagSet};
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

/// One agreement/government rule instantiated between two entities.
/// Every edge is a predicate over candidate pairs; a pair outside the
/// edge's word classes is vacuously compatible, so cross-POS ambiguity
/// survives the fixpoint and is settled by selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Article and its nominal: Case, Gender, Number concord.
    ArticleNoun,
    /// Adjective and its noun: Case, Gender, Number concord.
    AdjectiveNoun,
    /// Nominative nominal and its finite verb: Person, Number concord.
    SubjectVerb,
    /// Two nominal heads cannot both claim the Nominative of one clause.
    UniqueSubject,
    /// A word class check on the immediately preverbal slot: an article
    /// reading is impossible there, a clitic pronoun reading is fine.
    CliticVerb,
    /// Case imposed by a governing lemma (lexicon `governs` bits) on its
    /// complement.
    Government,
}

/// Per-entity capability summary, computed once from the initial candidate
/// sets. Unknown entities have no capabilities and take part in no edge,
/// which is exactly their wildcard semantics.
#[derive(Debug, Clone, Copy, Default)]
struct Caps {
    article: bool,
    adjective: bool,
    noun_like: bool,
    nominal: bool,
    finite_verb: bool,
    pronoun: bool,
    governs_case: bool,
}

pub struct ConstraintGraph {
    graph: Graph<usize, ConstraintKind>,
    /// order index -> incident edges, for worklist re-enqueueing
    touching: Vec<Vec<EdgeIndex>>,
}

impl ConstraintGraph {
    pub fn build(world: &SentenceWorld, lexicon: &ArchivedLexicon) -> Self {
        let order = world.order();
        let n = order.len();

        let caps: Vec<Caps> = order
            .iter()
            .map(|&entity| {
                let Ok(candidates) = world.inner().get::<&Candidates>(entity) else {
                    return Caps::default();
                };
                let mut caps = Caps::default();
                for candidate in &candidates.set {
                    let pos = pos_of(lexicon, candidate);
                    caps.article |= pos == Some(PartOfSpeech::Article);
                    caps.adjective |= pos == Some(PartOfSpeech::Adjective);
                    caps.pronoun |= pos == Some(PartOfSpeech::Pronoun);
                    caps.noun_like |= matches!(
                        pos,
                        Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun | PartOfSpeech::Numeral)
                    );
                    caps.nominal |= candidate.tags.is_nominal();
                    caps.finite_verb |= candidate.tags.is_finite_verb();
                    caps.governs_case |= governed_case(lexicon, candidate).is_some();
                }
                caps
            })
            .collect();

        let mut graph: Graph<usize, ConstraintKind> = Graph::new();
        let nodes: Vec<NodeIndex> = (0..n).map(|i| graph.add_node(i)).collect();
        let mut touching: Vec<Vec<EdgeIndex>> = vec![Vec::new(); n];
        let mut connect = |graph: &mut Graph<usize, ConstraintKind>,
                           touching: &mut Vec<Vec<EdgeIndex>>,
                           a: usize,
                           b: usize,
                           kind: ConstraintKind| {
            let edge = graph.add_edge(nodes[a], nodes[b], kind);
            touching[a].push(edge);
            touching[b].push(edge);
        };

        let any_verb = caps.iter().any(|c| c.finite_verb);

        for i in 0..n {
            // Concord with the next nominal in line.
            if caps[i].article {
                if let Some(j) = (i + 1..n).find(|&j| caps[j].nominal) {
                    connect(&mut graph, &mut touching, i, j, ConstraintKind::ArticleNoun);
                }
            }
            if caps[i].adjective {
                if let Some(j) = (i + 1..n).find(|&j| caps[j].noun_like) {
                    connect(&mut graph, &mut touching, i, j, ConstraintKind::AdjectiveNoun);
                }
            }
            // Proclitic slot: directly before a finite verb.
            if (caps[i].article || caps[i].pronoun) && i + 1 < n && caps[i + 1].finite_verb {
                connect(&mut graph, &mut touching, i, i + 1, ConstraintKind::CliticVerb);
            }
            // Subject concord with the nearest verb, looking right then left.
            if caps[i].noun_like {
                let verb = (i + 1..n)
                    .find(|&j| caps[j].finite_verb)
                    .or_else(|| (0..i).rev().find(|&j| caps[j].finite_verb));
                if let Some(j) = verb {
                    connect(&mut graph, &mut touching, i, j, ConstraintKind::SubjectVerb);
                }
            }
            if caps[i].governs_case {
                if let Some(j) = (i + 1..n).find(|&j| caps[j].nominal) {
                    connect(&mut graph, &mut touching, i, j, ConstraintKind::Government);
                }
            }
            // One subject per clause.
            if any_verb && caps[i].noun_like {
                for j in i + 1..n {
                    if caps[j].noun_like {
                        connect(&mut graph, &mut touching, i, j, ConstraintKind::UniqueSubject);
                    }
                }
            }
        }

        tracing::debug!(
            entities = n,
            edges = graph.edge_count(),
            "constraint graph built"
        );

        Self { graph, touching }
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// (source order index, target order index, kind)
    pub fn edge(&self, edge: EdgeIndex) -> (usize, usize, ConstraintKind) {
        let (s, t) = self
            .graph
            .edge_endpoints(edge)
            .expect("edge indices never dangle");
        (self.graph[s], self.graph[t], self.graph[edge])
    }

    pub fn touching(&self, order_index: usize) -> &[EdgeIndex] {
        &self.touching[order_index]
    }
}

fn pos_of(lexicon: &ArchivedLexicon, candidate: &Candidate) -> Option<PartOfSpeech> {
    lexicon.lemma(candidate.lemma).map(|l| l.pos.to_native())
}

/// The Case bits a candidate imposes on its complement, if any.
fn governed_case(lexicon: &ArchivedLexicon, candidate: &Candidate) -> Option<TagSet> {
    let bits = lexicon.lemma(candidate.lemma)?.governs() & TagSet::CASES;
    (!bits.is_empty()).then_some(bits)
}

/// The pair predicate: is source candidate `a` compatible with target
/// candidate `b` under `kind`?
pub fn compatible(
    lexicon: &ArchivedLexicon,
    kind: ConstraintKind,
    a: &Candidate,
    b: &Candidate,
) -> bool {
    match kind {
        ConstraintKind::ArticleNoun => match pos_of(lexicon, a) {
            Some(PartOfSpeech::Article) if b.tags.is_nominal() => a.tags.agrees_nominal(b.tags),
            // The weak pronoun series never premodifies a nominal.
            Some(PartOfSpeech::Pronoun) if b.tags.is_nominal() => false,
            _ => true,
        },
        ConstraintKind::AdjectiveNoun => {
            if pos_of(lexicon, a) == Some(PartOfSpeech::Adjective)
                && pos_of(lexicon, b) == Some(PartOfSpeech::Noun)
            {
                a.tags.agrees_nominal(b.tags)
            } else {
                true
            }
        }
        ConstraintKind::SubjectVerb => {
            if a.tags.contains(TagSet::NOMINATIVE) && b.tags.is_finite_verb() {
                let mut subject_person = a.tags & TagSet::PERSONS;
                if subject_person.is_empty() {
                    subject_person = TagSet::THIRD_PERSON;
                }
                subject_person == b.tags & TagSet::PERSONS
                    && a.tags.agrees_on(b.tags, TagSet::NUMBERS)
            } else {
                true
            }
        }
        ConstraintKind::UniqueSubject => {
            let both_heads = matches!(
                pos_of(lexicon, a),
                Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun)
            ) && matches!(
                pos_of(lexicon, b),
                Some(PartOfSpeech::Noun | PartOfSpeech::Pronoun)
            );
            !(both_heads
                && a.tags.contains(TagSet::NOMINATIVE)
                && b.tags.contains(TagSet::NOMINATIVE))
        }
        ConstraintKind::CliticVerb => {
            // An article reading is impossible directly before a verb.
            !(pos_of(lexicon, a) == Some(PartOfSpeech::Article) && b.tags.is_finite_verb())
        }
        ConstraintKind::Government => match governed_case(lexicon, a) {
            Some(case) if b.tags.is_nominal() => b.tags.intersects(case),
            _ => true,
        },
    }
}
