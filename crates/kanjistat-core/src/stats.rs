use serde::Serialize;

/// Mean, sample variance, standard deviation and size of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// The sample was too small or too flat for the requested statistic.
///
/// Callers are expected to report these as "insufficient data" and carry on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Insufficient data: need at least 2 values, found {found}")]
    EmptySample { found: usize },

    #[error("Insufficient data: {axis} values have zero variance")]
    ZeroVariance { axis: &'static str },
}

fn require_sample(len: usize) -> Result<(), StatsError> {
    if len <= 1 {
        return Err(StatsError::EmptySample { found: len });
    }
    Ok(())
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample { found: 0 });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample variance
pub fn sample_variance(values: &[f64]) -> Result<f64, StatsError> {
    require_sample(values.len())?;
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Ok(squares / (values.len() - 1) as f64)
}

/// Sample standard deviation
pub fn sample_std_dev(values: &[f64]) -> Result<f64, StatsError> {
    sample_variance(values).map(f64::sqrt)
}

pub fn summarize(values: &[f64]) -> Result<StatSummary, StatsError> {
    require_sample(values.len())?;
    let mean = mean(values)?;
    let variance = sample_variance(values)?;

    Ok(StatSummary {
        mean,
        variance,
        std_dev: variance.sqrt(),
        count: values.len(),
    })
}

/// Pearson's correlation coefficient over `(x, y)` pairs
pub fn correlation(pairs: &[(f64, f64)]) -> Result<f64, StatsError> {
    require_sample(pairs.len())?;

    let xs: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
    let ys: Vec<f64> = pairs.iter().map(|(_, y)| *y).collect();

    let x_bar = mean(&xs)?;
    let y_bar = mean(&ys)?;
    let s_x = sample_std_dev(&xs)?;
    let s_y = sample_std_dev(&ys)?;

    if s_x == 0.0 {
        return Err(StatsError::ZeroVariance { axis: "x" });
    }
    if s_y == 0.0 {
        return Err(StatsError::ZeroVariance { axis: "y" });
    }

    let numerator: f64 = pairs.iter().map(|(x, y)| (x - x_bar) * (y - y_bar)).sum();
    let n = pairs.len() as f64;
    Ok(numerator / ((n - 1.0) * s_x * s_y))
}
