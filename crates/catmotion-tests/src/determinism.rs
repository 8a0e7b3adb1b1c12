//! Run-to-run comparison of byte outputs.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    pub runs: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First differing byte offset and the run it came from.
    pub first_difference: Option<(usize, usize)>,
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        assert!(self.is_deterministic, "{}", self);
    }
}

impl fmt::Display for DeterminismResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_difference {
            None => write!(f, "deterministic over {} runs ({})", self.runs, self.hash),
            Some((offset, run)) => write!(
                f,
                "run {} differs from run 0 at byte {} (run 0 hash {})",
                run, offset, self.hash
            ),
        }
    }
}

/// Call `generate` `runs` times and compare every output with the first.
pub fn verify_determinism<F>(generate: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<u8>,
{
    let runs = runs.max(2);
    let reference = generate();
    let hash = blake3::hash(&reference).to_hex().to_string();

    for run in 1..runs {
        let output = generate();
        if output != reference {
            let offset = reference
                .iter()
                .zip(&output)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| reference.len().min(output.len()));
            return DeterminismResult {
                is_deterministic: false,
                runs: run + 1,
                hash,
                first_difference: Some((offset, run)),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        hash,
        first_difference: None,
    }
}
