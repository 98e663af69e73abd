use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes, compare(PartialEq))]
#[archive_attr(derive(Debug, Clone, Copy, PartialEq, Eq))]
#[repr(u8)]
pub enum Gender {
    Masculine = 0,
    Feminine = 1,
    Neuter = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes, compare(PartialEq))]
#[archive_attr(derive(Debug, Clone, Copy, PartialEq, Eq))]
#[repr(u8)]
pub enum Voice {
    Active = 0,
    Passive = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes, compare(PartialEq))]
#[archive_attr(derive(Debug, Clone, Copy, PartialEq, Eq))]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Adjective = 1,
    Verb = 2,
    Adverb = 3,
    Article = 4,
    Preposition = 5,
    Conjunction = 6,
    Pronoun = 7,
    Particle = 8,
    Numeral = 9,
}

impl ArchivedPartOfSpeech {
    /// The unarchived value, for consumers that branch on word class.
    pub fn to_native(self) -> PartOfSpeech {
        match self {
            ArchivedPartOfSpeech::Noun => PartOfSpeech::Noun,
            ArchivedPartOfSpeech::Adjective => PartOfSpeech::Adjective,
            ArchivedPartOfSpeech::Verb => PartOfSpeech::Verb,
            ArchivedPartOfSpeech::Adverb => PartOfSpeech::Adverb,
            ArchivedPartOfSpeech::Article => PartOfSpeech::Article,
            ArchivedPartOfSpeech::Preposition => PartOfSpeech::Preposition,
            ArchivedPartOfSpeech::Conjunction => PartOfSpeech::Conjunction,
            ArchivedPartOfSpeech::Pronoun => PartOfSpeech::Pronoun,
            ArchivedPartOfSpeech::Particle => PartOfSpeech::Particle,
            ArchivedPartOfSpeech::Numeral => PartOfSpeech::Numeral,
        }
    }
}

bitflags! {
    /// Morphological tag bitset.
    ///
    /// Each grammatical category occupies its own bit range. A *resolved*
    /// TagSet carries at most one bit per category; ambiguity is always
    /// represented as multiple alternative [`Candidate`](crate::Candidate)s,
    /// never as a multi-bit value inside one candidate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct TagSet: u32 {
        // Case (Bits 0-3)
        const NOMINATIVE = 1;
        const GENITIVE = 1 << 1;
        const ACCUSATIVE = 1 << 2;
        const VOCATIVE = 1 << 3;

        // Gender (Bits 4-6)
        const MASCULINE = 1 << 4;
        const FEMININE = 1 << 5;
        const NEUTER = 1 << 6;

        // Number (Bits 7-8)
        const SINGULAR = 1 << 7;
        const PLURAL = 1 << 8;

        // Person (Bits 9-11)
        const FIRST_PERSON = 1 << 9;
        const SECOND_PERSON = 1 << 10;
        const THIRD_PERSON = 1 << 11;

        // Aspect (Bits 12-14)
        const IMPERFECTIVE = 1 << 12;
        const PERFECTIVE = 1 << 13;
        const PERFECT = 1 << 14;

        // Time (Bits 15-16)
        const PAST = 1 << 15;
        const NONPAST = 1 << 16;

        // Voice (Bits 17-18)
        const ACTIVE = 1 << 17;
        const PASSIVE = 1 << 18;

        // Mood (Bits 19-20)
        const INDICATIVE = 1 << 19;
        const SUBJUNCTIVE = 1 << 20;

        // Lexical flag: surface Passive, syntactic Active (Bit 21)
        const DEPONENT = 1 << 21;
    }
}

impl TagSet {
    pub const CASES: TagSet = TagSet::NOMINATIVE
        .union(TagSet::GENITIVE)
        .union(TagSet::ACCUSATIVE)
        .union(TagSet::VOCATIVE);
    pub const GENDERS: TagSet = TagSet::MASCULINE
        .union(TagSet::FEMININE)
        .union(TagSet::NEUTER);
    pub const NUMBERS: TagSet = TagSet::SINGULAR.union(TagSet::PLURAL);
    pub const PERSONS: TagSet = TagSet::FIRST_PERSON
        .union(TagSet::SECOND_PERSON)
        .union(TagSet::THIRD_PERSON);
    pub const ASPECTS: TagSet = TagSet::IMPERFECTIVE
        .union(TagSet::PERFECTIVE)
        .union(TagSet::PERFECT);
    pub const TIMES: TagSet = TagSet::PAST.union(TagSet::NONPAST);
    pub const VOICES: TagSet = TagSet::ACTIVE.union(TagSet::PASSIVE);
    pub const MOODS: TagSet = TagSet::INDICATIVE.union(TagSet::SUBJUNCTIVE);

    const CATEGORY_MASKS: [TagSet; 8] = [
        TagSet::CASES,
        TagSet::GENDERS,
        TagSet::NUMBERS,
        TagSet::PERSONS,
        TagSet::ASPECTS,
        TagSet::TIMES,
        TagSet::VOICES,
        TagSet::MOODS,
    ];

    /// Project a single category out of the set.
    pub fn category(self, mask: TagSet) -> TagSet {
        self & mask
    }

    /// At most one bit per grammatical category.
    pub fn is_resolved(self) -> bool {
        Self::CATEGORY_MASKS
            .iter()
            .all(|mask| (self & *mask).bits().count_ones() <= 1)
    }

    /// Two tag sets agree on a category when either side leaves it
    /// unspecified or both carry the same value.
    pub fn agrees_on(self, other: TagSet, mask: TagSet) -> bool {
        let a = self & mask;
        let b = other & mask;
        a.is_empty() || b.is_empty() || a == b
    }

    /// Nominal concord: Case, Gender and Number all agree.
    pub fn agrees_nominal(self, other: TagSet) -> bool {
        self.agrees_on(other, Self::CASES)
            && self.agrees_on(other, Self::GENDERS)
            && self.agrees_on(other, Self::NUMBERS)
    }

    /// The syntactic voice of the form. Deponent lemmas inflect as Passive
    /// but behave as Active; every consumer must read voice through this
    /// accessor, never the raw Voice bits.
    pub fn syntactic_voice(self) -> Option<Voice> {
        if self.contains(TagSet::DEPONENT) {
            Some(Voice::Active)
        } else if self.contains(TagSet::ACTIVE) {
            Some(Voice::Active)
        } else if self.contains(TagSet::PASSIVE) {
            Some(Voice::Passive)
        } else {
            None
        }
    }

    /// A finite verb form carries both Person and Mood.
    pub fn is_finite_verb(self) -> bool {
        self.intersects(Self::PERSONS) && self.intersects(Self::MOODS)
    }

    /// Anything that declines for Case.
    pub fn is_nominal(self) -> bool {
        self.intersects(Self::CASES)
    }
}

// rkyv support for TagSet
impl Archive for TagSet {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::ser::Serializer + ?Sized> Serialize<S> for TagSet {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<TagSet, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<TagSet, D::Error> {
        Ok(TagSet::from_bits(*self).unwrap_or_else(|| TagSet::from_bits_truncate(*self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_rejects_multi_bit_categories() {
        let ok = TagSet::NOMINATIVE | TagSet::MASCULINE | TagSet::SINGULAR;
        assert!(ok.is_resolved());

        let bad = TagSet::NOMINATIVE | TagSet::ACCUSATIVE | TagSet::MASCULINE;
        assert!(!bad.is_resolved());
    }

    #[test]
    fn agreement_ignores_unspecified_categories() {
        let article = TagSet::ACCUSATIVE | TagSet::FEMININE | TagSet::SINGULAR;
        let noun = TagSet::ACCUSATIVE | TagSet::FEMININE | TagSet::SINGULAR;
        let verb = TagSet::THIRD_PERSON | TagSet::SINGULAR;

        assert!(article.agrees_nominal(noun));
        // The verb has no Case or Gender, so nominal concord holds vacuously.
        assert!(verb.agrees_nominal(noun));
        assert!(!TagSet::PLURAL.agrees_on(TagSet::SINGULAR, TagSet::NUMBERS));
    }

    #[test]
    fn deponent_reads_as_active() {
        let surface = TagSet::FIRST_PERSON
            | TagSet::SINGULAR
            | TagSet::PASSIVE
            | TagSet::INDICATIVE
            | TagSet::DEPONENT;
        assert_eq!(surface.syntactic_voice(), Some(Voice::Active));

        let true_passive = surface - TagSet::DEPONENT;
        assert_eq!(true_passive.syntactic_voice(), Some(Voice::Passive));
    }

    #[test]
    fn finite_verb_requires_person_and_mood() {
        let verb = TagSet::THIRD_PERSON | TagSet::SINGULAR | TagSet::INDICATIVE;
        assert!(verb.is_finite_verb());

        // Implicit subjects carry Person but no Mood.
        let implicit = TagSet::NOMINATIVE | TagSet::FIRST_PERSON | TagSet::SINGULAR;
        assert!(!implicit.is_finite_verb());
        assert!(implicit.is_nominal());
    }
}
