#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod engine;
pub mod orthography;

pub use engine::Morphology;

use core::fmt;

use glossa_protocol::{LemmaId, ParadigmId, TagSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphError {
    UnknownLemma(LemmaId),
    MissingParadigm(ParadigmId),
    /// No rule produces this tag combination under the lemma's paradigm
    /// (e.g. a Vocative requested of a paradigm lacking one). Recoverable.
    UnsupportedTagCombination { lemma: LemmaId, tags: TagSet },
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphError::UnknownLemma(id) => write!(f, "Unknown lemma id {}", id.0),
            MorphError::MissingParadigm(id) => write!(f, "Missing paradigm id {}", id.0),
            MorphError::UnsupportedTagCombination { lemma, tags } => write!(
                f,
                "Lemma {} has no form for tags {:?}",
                lemma.0, tags
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorphError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use glossa_protocol::{
        Gender, InflectionRule, Lemma, Lexicon, Paradigm, PartOfSpeech, Register, TagSet, Valency,
    };
    use proptest::prelude::*;

    fn lemma(
        id: u32,
        text: &str,
        stems: &[&str],
        paradigm: u32,
        pos: PartOfSpeech,
        gender: Gender,
    ) -> Lemma {
        Lemma {
            id: LemmaId(id),
            text: String::from(text),
            stems: stems.iter().map(|s| String::from(*s)).collect(),
            paradigm: ParadigmId(paradigm),
            pos,
            gender,
            freq_rank: id * 10,
            valency: Valency::None,
            register: Register::Standard,
            deponent: false,
            governs: 0,
        }
    }

    fn rule(tags: TagSet, stem: u8, suffix: &str) -> InflectionRule {
        InflectionRule {
            tags: tags.bits(),
            stem,
            suffix: String::from(suffix),
        }
    }

    fn sample_lexicon_bytes() -> rkyv::AlignedVec {
        use TagSet as T;

        let article = Paradigm {
            id: ParadigmId(0),
            pos: PartOfSpeech::Article,
            endings: alloc::vec![
                rule(T::NOMINATIVE | T::MASCULINE | T::SINGULAR, 0, "ο"),
                rule(T::GENITIVE | T::MASCULINE | T::SINGULAR, 0, "του"),
                rule(T::ACCUSATIVE | T::MASCULINE | T::SINGULAR, 0, "τον"),
                rule(T::NOMINATIVE | T::FEMININE | T::SINGULAR, 0, "η"),
                rule(T::GENITIVE | T::FEMININE | T::SINGULAR, 0, "της"),
                rule(T::ACCUSATIVE | T::FEMININE | T::SINGULAR, 0, "την"),
                rule(T::NOMINATIVE | T::NEUTER | T::SINGULAR, 0, "το"),
                rule(T::ACCUSATIVE | T::NEUTER | T::SINGULAR, 0, "το"),
                rule(T::NOMINATIVE | T::MASCULINE | T::PLURAL, 0, "οι"),
                rule(T::NOMINATIVE | T::FEMININE | T::PLURAL, 0, "οι"),
                rule(T::ACCUSATIVE | T::MASCULINE | T::PLURAL, 0, "τους"),
                rule(T::ACCUSATIVE | T::FEMININE | T::PLURAL, 0, "τις"),
                rule(T::NOMINATIVE | T::NEUTER | T::PLURAL, 0, "τα"),
                rule(T::ACCUSATIVE | T::NEUTER | T::PLURAL, 0, "τα"),
            ],
        };

        let masc_os = Paradigm {
            id: ParadigmId(1),
            pos: PartOfSpeech::Noun,
            endings: alloc::vec![
                rule(T::NOMINATIVE | T::MASCULINE | T::SINGULAR, 0, "ος"),
                rule(T::GENITIVE | T::MASCULINE | T::SINGULAR, 1, "ου"),
                rule(T::ACCUSATIVE | T::MASCULINE | T::SINGULAR, 0, "ο"),
                rule(T::VOCATIVE | T::MASCULINE | T::SINGULAR, 0, "ε"),
                rule(T::NOMINATIVE | T::MASCULINE | T::PLURAL, 0, "οι"),
                rule(T::GENITIVE | T::MASCULINE | T::PLURAL, 1, "ων"),
                rule(T::ACCUSATIVE | T::MASCULINE | T::PLURAL, 1, "ους"),
            ],
        };

        // Anisosyllabic class: the plural grows a syllable via stem slot 1.
        let masc_as = Paradigm {
            id: ParadigmId(2),
            pos: PartOfSpeech::Noun,
            endings: alloc::vec![
                rule(T::NOMINATIVE | T::MASCULINE | T::SINGULAR, 0, "ς"),
                rule(T::GENITIVE | T::MASCULINE | T::SINGULAR, 0, ""),
                rule(T::ACCUSATIVE | T::MASCULINE | T::SINGULAR, 0, ""),
                rule(T::NOMINATIVE | T::MASCULINE | T::PLURAL, 1, "ες"),
                rule(T::GENITIVE | T::MASCULINE | T::PLURAL, 1, "ων"),
                rule(T::ACCUSATIVE | T::MASCULINE | T::PLURAL, 1, "ες"),
            ],
        };

        let verb_active = Paradigm {
            id: ParadigmId(3),
            pos: PartOfSpeech::Verb,
            endings: alloc::vec![
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::ACTIVE | T::INDICATIVE,
                    0,
                    "ω"
                ),
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::ACTIVE | T::SUBJUNCTIVE,
                    0,
                    "ω"
                ),
                rule(
                    T::THIRD_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::ACTIVE | T::INDICATIVE,
                    0,
                    "ει"
                ),
                rule(
                    T::THIRD_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::ACTIVE | T::SUBJUNCTIVE,
                    0,
                    "ει"
                ),
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::PERFECTIVE | T::NONPAST | T::ACTIVE | T::SUBJUNCTIVE,
                    1,
                    "ω"
                ),
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::PERFECTIVE | T::PAST | T::ACTIVE | T::INDICATIVE,
                    2,
                    "α"
                ),
            ],
        };

        let verb_deponent = Paradigm {
            id: ParadigmId(4),
            pos: PartOfSpeech::Verb,
            endings: alloc::vec![
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::PASSIVE | T::INDICATIVE,
                    0,
                    "ομαι"
                ),
                rule(
                    T::FIRST_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::PASSIVE | T::SUBJUNCTIVE,
                    0,
                    "ομαι"
                ),
                rule(
                    T::THIRD_PERSON | T::SINGULAR | T::IMPERFECTIVE | T::NONPAST | T::PASSIVE | T::INDICATIVE,
                    0,
                    "εται"
                ),
            ],
        };

        let mut erchomai = lemma(
            4,
            "έρχομαι",
            &["έρχ"],
            4,
            PartOfSpeech::Verb,
            Gender::Neuter,
        );
        erchomai.deponent = true;
        erchomai.valency = Valency::Intransitive;

        let mut diavazo = lemma(
            3,
            "διαβάζω",
            &["διαβάζ", "διαβάσ", "διάβασ"],
            3,
            PartOfSpeech::Verb,
            Gender::Neuter,
        );
        diavazo.valency = Valency::Transitive;

        let lexicon = Lexicon {
            version: 1,
            lemmas: alloc::vec![
                lemma(0, "ο", &[""], 0, PartOfSpeech::Article, Gender::Masculine),
                lemma(
                    1,
                    "άνθρωπος",
                    &["άνθρωπ", "ανθρώπ"],
                    1,
                    PartOfSpeech::Noun,
                    Gender::Masculine
                ),
                lemma(
                    2,
                    "ψαράς",
                    &["ψαρά", "ψαράδ"],
                    2,
                    PartOfSpeech::Noun,
                    Gender::Masculine
                ),
                diavazo,
                erchomai,
            ],
            paradigms: alloc::vec![article, masc_os, masc_as, verb_active, verb_deponent],
        };

        rkyv::to_bytes::<_, 8192>(&lexicon).expect("Failed to serialize fixture lexicon")
    }

    #[test]
    fn round_trip_holds_for_every_paradigm_cell() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).expect("valid archive");
        let morph = Morphology::new(lexicon);

        for (l_idx, entry) in lexicon.lemmas.iter().enumerate() {
            let id = LemmaId(l_idx as u32);
            let paradigm = lexicon.paradigm(ParadigmId(entry.paradigm.0)).unwrap();
            for rule in paradigm.endings.iter() {
                if rule.stem as usize >= entry.stems.len() {
                    continue;
                }
                let mut tags = rule.tags();
                if entry.deponent {
                    tags |= TagSet::DEPONENT;
                }
                let form = morph.generate(id, tags).expect("cell must generate");
                let candidates = morph.analyze(&form);
                assert!(
                    candidates.iter().any(|c| c.lemma == id && c.tags == tags),
                    "analyze({form}) lost ({}, {tags:?})",
                    entry.text.as_str(),
                );
            }
        }
    }

    #[test]
    fn analyze_is_accent_and_case_insensitive() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        let wanted = TagSet::NOMINATIVE | TagSet::MASCULINE | TagSet::SINGULAR;
        for surface in ["άνθρωπος", "Άνθρωπος", "ΑΝΘΡΩΠΟΣ"] {
            let candidates = morph.analyze(surface);
            assert!(
                candidates
                    .iter()
                    .any(|c| c.lemma == LemmaId(1) && c.tags == wanted),
                "missing nominative reading for {surface}",
            );
        }
    }

    #[test]
    fn ambiguity_is_separate_resolved_candidates() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        // "το" is the neuter article in both Nominative and Accusative.
        let candidates = morph.analyze("το");
        assert!(candidates.len() >= 2);
        for c in &candidates {
            assert!(c.tags.is_resolved(), "unresolved candidate {c:?}");
        }
    }

    #[test]
    fn analyze_oov_is_empty_not_error() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        assert!(morph.analyze("ξωτικό").is_empty());
    }

    #[test]
    fn generate_rejects_unsupported_combination() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        // The article paradigm has no Vocative cell.
        let tags = TagSet::VOCATIVE | TagSet::MASCULINE | TagSet::SINGULAR;
        let err = morph.generate(LemmaId(0), tags).unwrap_err();
        assert_eq!(
            err,
            MorphError::UnsupportedTagCombination {
                lemma: LemmaId(0),
                tags
            }
        );
    }

    #[test]
    fn anisosyllabic_plural_uses_mutated_stem() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        let plural = morph
            .generate(
                LemmaId(2),
                TagSet::NOMINATIVE | TagSet::MASCULINE | TagSet::PLURAL,
            )
            .unwrap();
        assert_eq!(plural, "ψαράδες");

        let singular = morph
            .generate(
                LemmaId(2),
                TagSet::NOMINATIVE | TagSet::MASCULINE | TagSet::SINGULAR,
            )
            .unwrap();
        assert_eq!(singular, "ψαράς");
    }

    #[test]
    fn deponent_readings_carry_the_flag() {
        let bytes = sample_lexicon_bytes();
        let lexicon = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
        let morph = Morphology::new(lexicon);

        let candidates = morph.analyze("έρχομαι");
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(c.tags.contains(TagSet::DEPONENT));
            assert_eq!(
                c.tags.syntactic_voice(),
                Some(glossa_protocol::Voice::Active)
            );
        }
    }

    proptest! {
        #[test]
        fn test_safe_generation(stem in "[α-ρτ-ω]{1,8}", suffix in "[α-ρτ-ω]{0,4}") {
            let lexicon = Lexicon {
                version: 1,
                lemmas: alloc::vec![Lemma {
                    id: LemmaId(0),
                    text: stem.clone(),
                    stems: alloc::vec![stem.clone()],
                    paradigm: ParadigmId(0),
                    pos: PartOfSpeech::Noun,
                    gender: Gender::Neuter,
                    freq_rank: 0,
                    valency: Valency::None,
                    register: Register::Standard,
                    deponent: false,
                    governs: 0,
                }],
                paradigms: alloc::vec![Paradigm {
                    id: ParadigmId(0),
                    pos: PartOfSpeech::Noun,
                    endings: alloc::vec![rule(TagSet::NOMINATIVE, 0, &suffix)],
                }],
            };

            let bytes = rkyv::to_bytes::<_, 4096>(&lexicon).unwrap();
            let archived = rkyv::check_archived_root::<Lexicon>(&bytes).unwrap();
            let morph = Morphology::new(archived);

            let result = morph.generate(LemmaId(0), TagSet::NOMINATIVE);
            prop_assert_eq!(result.unwrap(), alloc::format!("{}{}", stem, suffix));

            let found: Vec<_> = morph.analyze(&alloc::format!("{}{}", stem, suffix));
            prop_assert!(found.iter().any(|c| c.lemma == LemmaId(0)));
        }
    }
}
