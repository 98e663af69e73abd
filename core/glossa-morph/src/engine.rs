use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use glossa_protocol::{ArchivedLexicon, Candidate, LemmaId, ParadigmId, TagSet};

use crate::orthography::{fix_final_sigma, nfc, phonetic_key};
use crate::MorphError;

/// Bidirectional transducer over the archived lexicon.
///
/// Construction walks the paradigm tables once and builds the reverse
/// indices `analyze` needs; the store itself is never parsed or copied.
/// The engine is read-only after construction and freely shareable across
/// concurrent analysis passes.
pub struct Morphology<'a> {
    lexicon: &'a ArchivedLexicon,
    /// suffix phonetic key -> (paradigm index, rule index)
    suffixes: BTreeMap<String, Vec<(u32, u32)>>,
    /// stem phonetic key -> (paradigm index, stem slot, lemma index)
    stems: BTreeMap<String, Vec<(u32, u8, u32)>>,
}

impl<'a> Morphology<'a> {
    pub fn new(lexicon: &'a ArchivedLexicon) -> Self {
        let mut suffixes: BTreeMap<String, Vec<(u32, u32)>> = BTreeMap::new();
        for (p_idx, paradigm) in lexicon.paradigms.iter().enumerate() {
            for (r_idx, rule) in paradigm.endings.iter().enumerate() {
                suffixes
                    .entry(phonetic_key(rule.suffix.as_str()))
                    .or_default()
                    .push((p_idx as u32, r_idx as u32));
            }
        }

        let mut stems: BTreeMap<String, Vec<(u32, u8, u32)>> = BTreeMap::new();
        for (l_idx, lemma) in lexicon.lemmas.iter().enumerate() {
            for (slot, stem) in lemma.stems.iter().enumerate() {
                stems
                    .entry(phonetic_key(stem.as_str()))
                    .or_default()
                    .push((lemma.paradigm.0, slot as u8, l_idx as u32));
            }
        }

        Self {
            lexicon,
            suffixes,
            stems,
        }
    }

    pub fn lexicon(&self) -> &'a ArchivedLexicon {
        self.lexicon
    }

    /// Inflect `lemma` into the surface form carrying exactly `tags`.
    ///
    /// The DEPONENT flag is a lemma property, not a paradigm cell, so it is
    /// masked out before the rule lookup.
    pub fn generate(&self, lemma: LemmaId, tags: TagSet) -> Result<String, MorphError> {
        let entry = self
            .lexicon
            .lemma(lemma)
            .ok_or(MorphError::UnknownLemma(lemma))?;
        let paradigm_id = ParadigmId(entry.paradigm.0);
        let paradigm = self
            .lexicon
            .paradigm(paradigm_id)
            .ok_or(MorphError::MissingParadigm(paradigm_id))?;

        let wanted = (tags - TagSet::DEPONENT).bits();
        for rule in paradigm.endings.iter() {
            if rule.tags != wanted {
                continue;
            }
            // A rule referencing a stem slot the lemma lacks is unusable
            // for this lemma, same as a missing table cell.
            let Some(stem) = entry.stems.get(rule.stem as usize) else {
                continue;
            };
            let mut form = String::with_capacity(stem.len() + rule.suffix.len());
            form.push_str(stem.as_str());
            form.push_str(rule.suffix.as_str());
            return Ok(fix_final_sigma(&nfc(&form)));
        }

        Err(MorphError::UnsupportedTagCombination { lemma, tags })
    }

    /// Every (lemma, tags) reading of `surface` that round-trips through
    /// [`generate`](Self::generate).
    ///
    /// Out-of-vocabulary input yields an empty vec, not an error; callers
    /// must treat empty as a distinct outcome from a single unambiguous
    /// candidate.
    pub fn analyze(&self, surface: &str) -> Vec<Candidate> {
        let key = phonetic_key(surface);
        let mut seen: BTreeSet<(u32, u32)> = BTreeSet::new();
        let mut out = Vec::new();

        for cut in 0..=key.len() {
            if !key.is_char_boundary(cut) {
                continue;
            }
            let (stem_key, suffix_key) = key.split_at(cut);
            let Some(rules) = self.suffixes.get(suffix_key) else {
                continue;
            };
            let Some(stem_entries) = self.stems.get(stem_key) else {
                continue;
            };

            for &(p_idx, r_idx) in rules {
                let rule = &self.lexicon.paradigms[p_idx as usize].endings[r_idx as usize];
                for &(lemma_paradigm, slot, l_idx) in stem_entries {
                    if lemma_paradigm != p_idx || slot != rule.stem {
                        continue;
                    }
                    let lemma = &self.lexicon.lemmas[l_idx as usize];
                    let mut tags = rule.tags();
                    if lemma.deponent {
                        tags |= TagSet::DEPONENT;
                    }
                    if !seen.insert((l_idx, tags.bits())) {
                        continue;
                    }
                    // Round-trip filter: only keep readings generate maps
                    // back onto this surface form.
                    match self.generate(LemmaId(l_idx), tags) {
                        Ok(form) if phonetic_key(&form) == key => {
                            out.push(Candidate::new(LemmaId(l_idx), tags));
                        }
                        _ => {}
                    }
                }
            }
        }

        out
    }
}

impl<'a> core::fmt::Debug for Morphology<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Morphology")
            .field("suffix_keys", &self.suffixes.len())
            .field("stem_keys", &self.stems.len())
            .finish()
    }
}
