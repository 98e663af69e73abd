use rkyv::{Archive, Deserialize, Serialize};

use crate::ids::{LemmaId, ParadigmId};
use crate::tags::{Gender, PartOfSpeech, TagSet};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Argument structure a verb requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes, compare(PartialEq))]
#[archive_attr(derive(Debug, Clone, Copy, PartialEq, Eq))]
#[repr(u8)]
pub enum Valency {
    None = 0,
    Intransitive = 1,
    Transitive = 2,
    Ditransitive = 3,
}

/// Stylistic register of a lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes, compare(PartialEq))]
#[archive_attr(derive(Debug, Clone, Copy, PartialEq, Eq))]
#[repr(u8)]
pub enum Register {
    Standard = 0,
    Formal = 1,
    Colloquial = 2,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lemma {
    pub id: LemmaId,
    /// Citation form, e.g. "άνθρωπος".
    pub text: String,
    /// Inflectional stems. Index 0 is the base stem; further entries hold
    /// mutated stems (anisosyllabic plurals, perfective and past verb stems).
    pub stems: Vec<String>,
    pub paradigm: ParadigmId,
    pub pos: PartOfSpeech,
    /// Neuter for lemmas that do not inflect for gender.
    pub gender: Gender,
    /// Corpus frequency rank; lower is more frequent. Drives the
    /// deterministic fallback order when disambiguation fails.
    pub freq_rank: u32,
    pub valency: Valency,
    pub register: Register,
    /// Surface Voice is Passive while the syntactic role stays Active.
    pub deponent: bool,
    /// Raw [`TagSet`] bits this word imposes on its complement: the Case a
    /// preposition governs (με -> Accusative), the Mood a particle governs
    /// (να -> Subjunctive). Zero when nothing is governed.
    pub governs: u32,
}

/// One row of a paradigm table: the tags realized by gluing `suffix` onto
/// `stems[stem]`. `tags` are raw [`TagSet`] bits; the DEPONENT flag is a
/// lemma property and never stored here.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct InflectionRule {
    pub tags: u32,
    pub stem: u8,
    pub suffix: String,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Paradigm {
    pub id: ParadigmId,
    pub pos: PartOfSpeech,
    pub endings: Vec<InflectionRule>,
}

/// The compiled lexicon ("atlas"). Loaded once per process via
/// `rkyv::archived_root`, immutable thereafter, shared by reference across
/// any number of concurrent analysis passes.
///
/// Invariant: ids are dense: `lemmas[i].id == LemmaId(i)` and
/// `paradigms[i].id == ParadigmId(i)`. The atlas compiler enforces this.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub lemmas: Vec<Lemma>,
    pub paradigms: Vec<Paradigm>,
}

impl ArchivedLexicon {
    pub fn lemma(&self, id: LemmaId) -> Option<&ArchivedLemma> {
        self.lemmas.get(id.0 as usize)
    }

    pub fn paradigm(&self, id: ParadigmId) -> Option<&ArchivedParadigm> {
        self.paradigms.get(id.0 as usize)
    }
}

impl ArchivedLemma {
    pub fn governs(&self) -> TagSet {
        TagSet::from_bits_truncate(self.governs)
    }
}

impl ArchivedInflectionRule {
    pub fn tags(&self) -> TagSet {
        TagSet::from_bits_truncate(self.tags)
    }
}
