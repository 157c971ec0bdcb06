use serde::{Deserialize, Serialize};

/// Which engine mines the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Apriori,
    FpGrowth,
}

/// How repeated items inside one transaction are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemMultiplicity {
    /// Each item counts at most once per transaction; posting lists are duplicate-free.
    #[default]
    Collapse,
    /// Every occurrence is indexed, so a posting list may repeat a transaction id.
    /// An itemset's support then sums, over transactions, the fewest times any
    /// of its items occurs there.
    Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Fraction of transactions an itemset must appear in.
    pub support_threshold: f64,
    /// Worker count and Apriori fan-out target; 0 means hardware concurrency.
    pub parallelism: usize,
    pub algorithm: Algorithm,
    pub multiplicity: ItemMultiplicity,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            support_threshold: 0.01,
            parallelism: 0,
            algorithm: Algorithm::default(),
            multiplicity: ItemMultiplicity::default(),
        }
    }
}

impl MiningConfig {
    pub fn new(support_threshold: f64) -> Self {
        Self {
            support_threshold,
            ..Self::default()
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: ItemMultiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// Worker count with the 0 = hardware concurrency default applied.
    pub fn resolved_parallelism(&self) -> usize {
        resolve_parallelism(self.parallelism)
    }

    pub fn min_support_count(&self, transaction_count: usize) -> usize {
        min_support_count(self.support_threshold, transaction_count)
    }
}

pub(crate) fn resolve_parallelism(parallelism: usize) -> usize {
    if parallelism == 0 {
        num_cpus::get().max(1)
    } else {
        parallelism
    }
}

/// Absolute support count for a relative threshold: `ceil(threshold * n)`, never below 1.
///
/// Zero, negative and NaN thresholds all clamp to 1.
pub fn min_support_count(threshold: f64, transaction_count: usize) -> usize {
    let count = (threshold * transaction_count as f64).ceil();
    if count.is_nan() || count < 1.0 {
        1
    } else {
        count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_support_count_rounds_up() {
        assert_eq!(min_support_count(0.4, 5), 2);
        assert_eq!(min_support_count(0.41, 5), 3);
        assert_eq!(min_support_count(1.0, 7), 7);
    }

    #[test]
    fn test_min_support_count_clamps_to_one() {
        assert_eq!(min_support_count(0.0, 100), 1);
        assert_eq!(min_support_count(-0.5, 100), 1);
        assert_eq!(min_support_count(f64::NAN, 100), 1);
        assert_eq!(min_support_count(0.5, 0), 1);
        assert_eq!(min_support_count(0.001, 10), 1);
    }

    #[test]
    fn test_resolved_parallelism() {
        assert_eq!(MiningConfig::default().with_parallelism(3).resolved_parallelism(), 3);
        assert!(MiningConfig::default().resolved_parallelism() >= 1);
    }

    #[test]
    fn test_config_serde_names() {
        let config = MiningConfig::new(0.2).with_algorithm(Algorithm::FpGrowth);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"fp-growth\""));
        assert!(json.contains("\"collapse\""));
    }
}
