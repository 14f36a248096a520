// Roel Kluin, 2023, GPL v3

use crate::key::GraphKey;
use crate::new_types::twobit::TwoBit;
use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KMERLEN_MAX: u32 = 32;

/// A twobit packed k-mer. The first base is in the top bits, the last base in
/// the lowest two. Ordered by length, then by value.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Kmer {
    kmerlen: u32,
    dna: u64,
} //^-^\\

impl Kmer {
    /// an all-A kmer of this length
    pub fn new(kmerlen: u32) -> Result<Self> {
        ensure!(
            kmerlen != 0 && kmerlen <= KMERLEN_MAX,
            "kmer length {} not in 1..={}",
            kmerlen,
            KMERLEN_MAX
        );
        Ok(Kmer { kmerlen, dna: 0 })
    }
    pub fn from_bases(seq: &[u8]) -> Result<Self> {
        let kmerlen = u32::try_from(seq.len())?;
        let mut kmer = Kmer::new(kmerlen)?;
        for &b in seq {
            let b2 = TwoBit::from_ascii(b)
                .ok_or_else(|| anyhow!("ambiguous base '{}' in kmer", b as char))?;
            kmer.push(b2);
        }
        Ok(kmer)
    }
    pub fn value(&self) -> u64 {
        self.dna
    }
    pub fn len(&self) -> u32 {
        self.kmerlen
    }
    #[inline(always)]
    fn mask(&self) -> u64 {
        u64::MAX >> (64 - self.kmerlen * 2)
    }
    #[inline(always)]
    fn top_shift(&self) -> u32 {
        self.kmerlen * 2 - 2
    }
    /// adds twobit at the end, the first base is shifted out.
    pub fn push(&mut self, b2: TwoBit) {
        // XXX function is hot
        self.dna = ((self.dna << 2) & self.mask()) | b2.as_u64();
    }
    fn b2_at(&self, i: u32) -> TwoBit {
        TwoBit::new(((self.dna >> (self.top_shift() - i * 2)) & 3) as u8)
    }
}

impl GraphKey for Kmer {
    fn predecessor(&self, b2: TwoBit) -> Self {
        Kmer {
            kmerlen: self.kmerlen,
            dna: (self.dna >> 2) | b2.as_kmer_top(self.top_shift()),
        }
    }
    fn successor(&self, b2: TwoBit) -> Self {
        let mut kmer = *self;
        kmer.push(b2);
        kmer
    }
    fn last_symbol(&self) -> TwoBit {
        TwoBit::new((self.dna & 3) as u8)
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.kmerlen {
            write!(f, "{}", self.b2_at(i).as_ascii() as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#x})", self, self.dna)
    }
}

/// All kmers in a sequence. No kmer spans an ambiguous base.
pub struct KmerIter<'a> {
    seq: std::slice::Iter<'a, u8>,
    kmer: Kmer,
    filled: u32,
}

impl<'a> KmerIter<'a> {
    pub fn new(seq: &'a [u8], kmerlen: u32) -> Result<Self> {
        Ok(KmerIter {
            seq: seq.iter(),
            kmer: Kmer::new(kmerlen)?,
            filled: 0,
        })
    }
}

impl<'a> Iterator for KmerIter<'a> {
    type Item = Kmer;

    fn next(&mut self) -> Option<Kmer> {
        for &b in self.seq.by_ref() {
            match TwoBit::from_ascii(b) {
                Some(b2) => {
                    self.kmer.push(b2);
                    if self.filled < self.kmer.kmerlen {
                        self.filled += 1;
                    }
                    if self.filled == self.kmer.kmerlen {
                        return Some(self.kmer);
                    }
                }
                None => self.filled = 0,
            }
        }
        None
    }
}
