use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub count: usize,
    pub min: u64,
    pub max: u64,
    pub average: f64,
    pub median: f64,
    pub average_median_difference: f64,
}

impl PriceStats {
    /// `None` when there is nothing to aggregate.
    pub fn from_prices(prices: &[u64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: u64 = sorted.iter().sum();
        let average = sum as f64 / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            average,
            median,
            average_median_difference: (average - median).abs(),
        })
    }
}

pub fn format_duration(minutes: u64) -> String {
    format!("{} hours {} minutes", minutes / 60, minutes % 60)
}

/// Whole numbers print without a fraction, others with two decimals.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
