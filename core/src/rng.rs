//! Deterministic random number generation for demo data.
//!
//! RULE: The demo seeder never calls any platform RNG.
//! Each kind of generated record draws from its own stream, seeded from
//! (master_seed XOR stream_index). Adding a stream never changes the
//! data produced by existing ones.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single seeding stream.
pub struct SeedRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SeedRng {
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an i64 in [lo, hi].
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(hi >= lo, "empty range {lo}..={hi}");
        lo + self.next_u64_below((hi - lo) as u64 + 1) as i64
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// All seeding streams for one demo organisation.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, stream: SeedStream) -> SeedRng {
        SeedRng::new(self.master_seed, stream as u64).with_name(stream.name())
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SeedStream {
    Structure = 0,
    Roster = 1,
    Attrition = 2,
    Batches = 3,
}

impl SeedStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Roster => "roster",
            Self::Attrition => "attrition",
            Self::Batches => "batches",
        }
    }
}
