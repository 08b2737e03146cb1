// alignment.rs - Aligned sequence collection

use std::collections::HashSet;

use crate::error::PruneError;

/// Code used for gap, ambiguity and missing symbols after encoding
pub const MISSING: u8 = u8::MAX;

/// Encode a residue as a nucleotide index.
///
/// Purines come first (A=0, G=1) and pyrimidines second (C=2, T=3) so a
/// substitution is a transition exactly when both codes fall on the same
/// side of 2. Anything that is not an unambiguous base maps to [`MISSING`].
#[inline]
pub fn encode_base(residue: u8) -> u8 {
    match residue.to_ascii_uppercase() {
        b'A' => 0,
        b'G' => 1,
        b'C' => 2,
        b'T' | b'U' => 3,
        _ => MISSING,
    }
}

/// A single named row of the alignment
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSequence {
    pub id: String,
    pub residues: Vec<u8>,
}

impl AlignedSequence {
    /// Create a sequence, normalising residues to upper case DNA (U is read as T)
    pub fn new(id: impl Into<String>, residues: &[u8]) -> Self {
        let residues = residues
            .iter()
            .map(|r| match r.to_ascii_uppercase() {
                b'U' => b'T',
                other => other,
            })
            .collect();
        Self {
            id: id.into(),
            residues,
        }
    }

    /// Residues encoded with [`encode_base`]
    pub fn encoded(&self) -> Vec<u8> {
        self.residues.iter().map(|&r| encode_base(r)).collect()
    }

    /// Number of unambiguous nucleotide positions
    pub fn informative_sites(&self) -> usize {
        self.residues
            .iter()
            .filter(|&&r| encode_base(r) != MISSING)
            .count()
    }
}

/// Ordered collection of equal-length sequences with unique identifiers
#[derive(Debug, Clone)]
pub struct Alignment {
    sequences: Vec<AlignedSequence>,
    width: usize,
}

impl Alignment {
    /// Build an alignment, checking identifiers and row lengths
    pub fn new(sequences: Vec<AlignedSequence>) -> Result<Self, PruneError> {
        let first = sequences
            .first()
            .ok_or_else(|| PruneError::Parse("alignment contains no sequences".to_string()))?;
        let width = first.residues.len();

        let mut seen = HashSet::with_capacity(sequences.len());
        for (index, sequence) in sequences.iter().enumerate() {
            if sequence.id.is_empty() {
                return Err(PruneError::Parse(format!(
                    "sequence {} has an empty identifier",
                    index + 1
                )));
            }
            if !seen.insert(sequence.id.as_str()) {
                return Err(PruneError::Parse(format!(
                    "duplicate sequence identifier '{}'",
                    sequence.id
                )));
            }
            if sequence.residues.len() != width {
                return Err(PruneError::Parse(format!(
                    "sequence '{}' has length {}, expected {} (sequences are not aligned)",
                    sequence.id,
                    sequence.residues.len(),
                    width
                )));
            }
        }

        Ok(Self { sequences, width })
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of alignment columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn sequences(&self) -> &[AlignedSequence] {
        &self.sequences
    }

    pub fn get(&self, index: usize) -> Option<&AlignedSequence> {
        self.sequences.get(index)
    }

    /// Identifiers in alignment order
    pub fn ids(&self) -> Vec<String> {
        self.sequences.iter().map(|s| s.id.clone()).collect()
    }
}
