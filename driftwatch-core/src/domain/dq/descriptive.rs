// driftwatch-core/src/domain/dq/descriptive.rs

/// Small descriptive-statistics accumulator over an f64 sample.
///
/// The percentile uses the classic `p(n+1)/100` position with linear
/// interpolation, and the standard deviation is the POPULATION one
/// (divisor n, not n-1) — both choices are part of the check contract,
/// warning messages embed the resulting interval bounds.
#[derive(Debug, Default, Clone)]
pub struct DescriptiveStats {
    values: Vec<f64>,
}

impl DescriptiveStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn population_variance(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let mean = self.mean();
        self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / self.values.len() as f64
    }

    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    /// Percentile in (0, 100], position `p(n+1)/100`, linearly
    /// interpolated between neighbours, clamped to the sample bounds.
    pub fn percentile(&self, p: f64) -> f64 {
        let n = self.values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return self.values[0];
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let pos = p * (n as f64 + 1.0) / 100.0;
        if pos < 1.0 {
            return sorted[0];
        }
        if pos >= n as f64 {
            return sorted[n - 1];
        }

        let floor = pos.floor();
        let d = pos - floor;
        let lower = sorted[floor as usize - 1];
        let upper = sorted[floor as usize];
        lower + d * (upper - lower)
    }
}
