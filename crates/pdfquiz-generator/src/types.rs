//! Result types for QA assembly

use pdfquiz_domain::QaPair;

/// Outcome of one assembly run
#[derive(Debug, Clone, Default)]
pub struct AssemblyOutcome {
    /// Accepted pairs, in sampling order
    pub pairs: Vec<QaPair>,

    /// Qualifying sentences available for sampling
    pub available: usize,

    /// Sentences drawn, `min(n, available)`
    pub sampled: usize,

    /// Questions dropped for echoing their input
    pub rejected: usize,

    /// Sentences skipped because generation failed
    pub failed: usize,
}

impl AssemblyOutcome {
    /// True when no pair survived
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
