//! Sentence-graph ranking
//!
//! Sentences are nodes; edges are weighted by word overlap normalized by
//! sentence length. Scores come from damped power iteration over the
//! row-normalized similarity matrix.

use std::collections::HashMap;

/// Guards against division by zero for sentences with no overlap at all.
const ROW_EPSILON: f64 = 1e-7;

/// TextRank over a set of tokenized sentences.
#[derive(Debug, Clone)]
pub struct TextRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Iteration cap
    pub max_iterations: usize,
    /// Stop once the L2 change between iterations is at or below this
    pub threshold: f64,
}

impl Default for TextRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 500,
            threshold: 1e-4,
        }
    }
}

impl TextRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Score each sentence (given as its word list).
    ///
    /// Returns one score per input sentence, in input order.
    pub fn rank(&self, sentences: &[Vec<String>]) -> Vec<f64> {
        let n = sentences.len();
        if n == 0 {
            return Vec::new();
        }

        let matrix = self.transition_matrix(sentences);

        let mut scores = vec![1.0 / n as f64; n];
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            // p' = M^T p
            let mut next = vec![0.0; n];
            for (i, row) in matrix.iter().enumerate() {
                let weight = scores[i];
                for (j, m) in row.iter().enumerate() {
                    next[j] += m * weight;
                }
            }

            delta = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).powi(2))
                .sum::<f64>()
                .sqrt();
            scores = next;
        }

        tracing::debug!(sentences = n, iterations, delta, "ranked sentences");
        scores
    }

    /// Damped, row-normalized similarity matrix (self-edges included).
    fn transition_matrix(&self, sentences: &[Vec<String>]) -> Vec<Vec<f64>> {
        let n = sentences.len();
        let counts: Vec<HashMap<&str, usize>> = sentences
            .iter()
            .map(|words| {
                let mut c = HashMap::new();
                for w in words {
                    *c.entry(w.as_str()).or_insert(0) += 1;
                }
                c
            })
            .collect();

        let teleport = (1.0 - self.damping) / n as f64;
        let mut matrix = Vec::with_capacity(n);
        for i in 0..n {
            let row: Vec<f64> = (0..n)
                .map(|j| similarity(&sentences[i], &sentences[j], &counts[j]))
                .collect();
            let total: f64 = row.iter().sum::<f64>() + ROW_EPSILON;
            matrix.push(
                row.into_iter()
                    .map(|w| teleport + self.damping * (w / total))
                    .collect(),
            );
        }
        matrix
    }
}

/// Overlap of two sentences: occurrences in `b` of each word of `a`,
/// divided by `ln|a| + ln|b|` (raw overlap when that sum is ~0).
fn similarity(a: &[String], b: &[String], b_counts: &HashMap<&str, usize>) -> f64 {
    let overlap: usize = a
        .iter()
        .map(|w| b_counts.get(w.as_str()).copied().unwrap_or(0))
        .sum();
    if overlap == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm.abs() < 1e-9 {
        overlap as f64
    } else {
        overlap as f64 / norm
    }
}
