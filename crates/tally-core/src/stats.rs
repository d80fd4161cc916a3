//! Small descriptive statistics helpers

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N - 1 denominator)
///
/// Returns `None` with fewer than two values, where the sample
/// deviation is undefined.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Percentile with linear interpolation between closest ranks
///
/// `q` is a fraction in [0, 1]. Returns `None` for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Spread of per-day spending totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyStats {
    /// Number of distinct spending days
    pub days: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single day
    pub std_dev: Option<f64>,
}

impl DailyStats {
    pub fn from_totals(totals: &[f64]) -> Self {
        Self {
            days: totals.len(),
            mean: mean(totals),
            std_dev: sample_std_dev(totals),
        }
    }

    /// Deviation exceeds `ratio` of the mean. Needs more than one day.
    pub fn varies_more_than(&self, ratio: f64) -> bool {
        match self.std_dev {
            Some(sd) if self.days > 1 => sd > self.mean * ratio,
            _ => false,
        }
    }

    /// Deviation stays under `ratio` of the mean. Needs more than one day.
    pub fn varies_less_than(&self, ratio: f64) -> bool {
        match self.std_dev {
            Some(sd) if self.days > 1 => sd < self.mean * ratio,
            _ => false,
        }
    }
}
