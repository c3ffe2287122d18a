//! Distribution sampling functions
//!
//! Each function draws a fresh vector of [`SAMPLE_COUNT`] independent samples
//! from the process-local random source (`rand::thread_rng`). No seeding:
//! two calls with identical parameters are not expected to produce equal
//! vectors, and callers must not assume anything beyond statistical
//! properties.

use crate::error::{FormulaError, FormulaResult};
use crate::value::Samples;
use rand::Rng;
use rand_distr::{Beta, Distribution, LogNormal, Normal, Triangular};

/// Number of samples drawn per distribution call
pub const SAMPLE_COUNT: usize = 10_000;

/// Sample a triangular distribution on `[a, b]` with mode `c`.
///
/// Requires `a <= c <= b`. The degenerate case `a == b` yields a constant
/// vector.
pub fn triangular(a: f64, b: f64, c: f64) -> FormulaResult<Samples> {
    if !(a <= c && c <= b) {
        return Err(FormulaError::Parameter(format!(
            "triangular requires a <= c <= b, got a={}, b={}, c={}",
            a, b, c
        )));
    }
    if a == b {
        return Ok(vec![a; SAMPLE_COUNT]);
    }
    let dist = Triangular::new(a, b, c)
        .map_err(|e| FormulaError::Parameter(format!("triangular: {}", e)))?;
    Ok(draw(dist))
}

/// Sample a uniform distribution on `[a, b]`. Requires `a <= b`.
pub fn uniform(a: f64, b: f64) -> FormulaResult<Samples> {
    if !(a <= b) {
        return Err(FormulaError::Parameter(format!(
            "uniform requires a <= b, got a={}, b={}",
            a, b
        )));
    }
    let mut rng = rand::thread_rng();
    Ok((0..SAMPLE_COUNT)
        .map(|_| a + (b - a) * rng.gen::<f64>())
        .collect())
}

/// Sample a beta distribution. Both shape parameters must be positive.
pub fn beta(alpha: f64, b: f64) -> FormulaResult<Samples> {
    if !(alpha > 0.0) || !(b > 0.0) {
        return Err(FormulaError::Parameter(format!(
            "beta requires positive shape parameters, got alpha={}, beta={}",
            alpha, b
        )));
    }
    let dist =
        Beta::new(alpha, b).map_err(|e| FormulaError::Parameter(format!("beta: {}", e)))?;
    Ok(draw(dist))
}

/// Sample a normal distribution. The standard deviation must be non-negative.
pub fn normal(mean: f64, std: f64) -> FormulaResult<Samples> {
    if !(std >= 0.0) {
        return Err(FormulaError::Parameter(format!(
            "normal requires a non-negative standard deviation, got {}",
            std
        )));
    }
    let dist = Normal::new(mean, std)
        .map_err(|e| FormulaError::Parameter(format!("normal: {}", e)))?;
    Ok(draw(dist))
}

/// Sample a log-normal distribution with the given parameters of the
/// underlying normal. The standard deviation must be non-negative.
pub fn lognormal(mean: f64, std: f64) -> FormulaResult<Samples> {
    if !(std >= 0.0) {
        return Err(FormulaError::Parameter(format!(
            "lognormal requires a non-negative standard deviation, got {}",
            std
        )));
    }
    let dist = LogNormal::new(mean, std)
        .map_err(|e| FormulaError::Parameter(format!("lognormal: {}", e)))?;
    Ok(draw(dist))
}

fn draw<D: Distribution<f64>>(dist: D) -> Samples {
    let mut rng = rand::thread_rng();
    dist.sample_iter(&mut rng).take(SAMPLE_COUNT).collect()
}

// === Registry adapters ===
//
// These take the evaluated argument vectors and pull out the first element of
// each as the scalar parameter.

fn scalar_arg(args: &[Samples], index: usize) -> FormulaResult<f64> {
    args.get(index)
        .and_then(|v| v.first())
        .copied()
        .ok_or_else(|| FormulaError::Parameter(format!("missing argument {}", index + 1)))
}

pub(crate) fn fn_triangular(args: &[Samples]) -> FormulaResult<Samples> {
    let a = scalar_arg(args, 0)?;
    let b = scalar_arg(args, 1)?;
    let c = if args.len() > 2 {
        scalar_arg(args, 2)?
    } else {
        (a + b) / 2.0
    };
    triangular(a, b, c)
}

pub(crate) fn fn_uniform(args: &[Samples]) -> FormulaResult<Samples> {
    uniform(scalar_arg(args, 0)?, scalar_arg(args, 1)?)
}

pub(crate) fn fn_beta(args: &[Samples]) -> FormulaResult<Samples> {
    beta(scalar_arg(args, 0)?, scalar_arg(args, 1)?)
}

pub(crate) fn fn_normal(args: &[Samples]) -> FormulaResult<Samples> {
    normal(scalar_arg(args, 0)?, scalar_arg(args, 1)?)
}

pub(crate) fn fn_lognormal(args: &[Samples]) -> FormulaResult<Samples> {
    lognormal(scalar_arg(args, 0)?, scalar_arg(args, 1)?)
}
