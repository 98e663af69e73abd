use clap::Parser;
use glossa_protocol::{Lexicon, TagSet};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
enum AtlasError {
    #[error("lemma at position {index} has id {found}; ids must be dense")]
    LemmaIdNotDense { index: usize, found: u32 },

    #[error("paradigm at position {index} has id {found}; ids must be dense")]
    ParadigmIdNotDense { index: usize, found: u32 },

    #[error("lemma '{lemma}' references missing paradigm {paradigm}")]
    MissingParadigm { lemma: String, paradigm: u32 },

    #[error("rule {rule} of paradigm {paradigm} carries multiple bits in one tag category")]
    UnresolvedRuleTags { paradigm: u32, rule: usize },
}

/// The engine does O(1) id lookups and trusts every rule to be a resolved
/// paradigm cell; both invariants are checked here, once, offline.
fn validate(lexicon: &Lexicon) -> Result<(), AtlasError> {
    for (index, paradigm) in lexicon.paradigms.iter().enumerate() {
        if paradigm.id.0 as usize != index {
            return Err(AtlasError::ParadigmIdNotDense {
                index,
                found: paradigm.id.0,
            });
        }
        for (rule, ending) in paradigm.endings.iter().enumerate() {
            if !TagSet::from_bits_truncate(ending.tags).is_resolved() {
                return Err(AtlasError::UnresolvedRuleTags {
                    paradigm: paradigm.id.0,
                    rule,
                });
            }
        }
    }

    for (index, lemma) in lexicon.lemmas.iter().enumerate() {
        if lemma.id.0 as usize != index {
            return Err(AtlasError::LemmaIdNotDense {
                index,
                found: lemma.id.0,
            });
        }
        if lemma.paradigm.0 as usize >= lexicon.paradigms.len() {
            return Err(AtlasError::MissingParadigm {
                lemma: lemma.text.clone(),
                paradigm: lemma.paradigm.0,
            });
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON lexicon to the rkyv atlas binary")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("📖 Reading JSON from {:?}...", cli.input);
    let input_data = fs::read_to_string(&cli.input)?;

    let lexicon: Lexicon = serde_json::from_str(&input_data)?;

    println!(
        "⚙️  Compiling atlas version {} with {} lemmas, {} paradigms...",
        lexicon.version,
        lexicon.lemmas.len(),
        lexicon.paradigms.len()
    );

    validate(&lexicon)?;

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .expect("Failed to rkyv serialize");
    let bytes = serializer.into_serializer().into_inner();

    fs::write(&cli.output, bytes)?;

    println!("✅ Success! Binary written to {:?}", cli.output);
    Ok(())
}
