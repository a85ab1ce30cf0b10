use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::GraphError;

/// Source of edge budgets for the database assembler.
///
/// Implementations own their randomness; one value per call.
pub trait DistributionStrategy {
    fn next(&mut self) -> f64;
}

pub struct GaussianDistribution {
    normal: Normal<f64>,
    rng: StdRng,
}

impl GaussianDistribution {
    pub fn new(mean: f64, stddev: f64, rng: StdRng) -> Result<Self, GraphError> {
        let normal = Normal::new(mean, stddev)
            .map_err(|e| GraphError::InvalidParameter(format!("gaussian: {}", e)))?;
        Ok(GaussianDistribution { normal, rng })
    }
}

impl DistributionStrategy for GaussianDistribution {
    fn next(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }
}

pub struct UniformDistribution {
    min: f64,
    max: f64,
    rng: StdRng,
}

impl UniformDistribution {
    pub fn new(min: f64, max: f64, rng: StdRng) -> Result<Self, GraphError> {
        if min > max {
            return Err(GraphError::InvalidParameter(format!(
                "uniform: min {} exceeds max {}",
                min, max
            )));
        }
        Ok(UniformDistribution { min, max, rng })
    }
}

impl DistributionStrategy for UniformDistribution {
    fn next(&mut self) -> f64 {
        if self.min == self.max {
            self.min
        } else {
            self.rng.gen_range(self.min..self.max)
        }
    }
}

/// Degenerate distribution, mostly useful for tests and reproducible runs.
pub struct FixedDistribution {
    value: f64,
}

impl FixedDistribution {
    pub fn new(value: f64) -> Self {
        FixedDistribution { value }
    }
}

impl DistributionStrategy for FixedDistribution {
    fn next(&mut self) -> f64 {
        self.value
    }
}

/// Builds a distribution from a spec string such as
/// `gaussian(mean=250,stddev=50)`, `uniform(min=10,max=100)` or
/// `fixed(value=25)`.
pub fn distribution_from_spec(
    spec: &str,
    rng: StdRng,
) -> Result<Box<dyn DistributionStrategy>, GraphError> {
    let (name, params) = parse_spec(spec)?;
    match name.as_str() {
        "gaussian" => {
            let mean = require_param(spec, &params, "mean")?;
            let stddev = require_param(spec, &params, "stddev")?;
            Ok(Box::new(GaussianDistribution::new(mean, stddev, rng)?))
        }
        "uniform" => {
            let min = require_param(spec, &params, "min")?;
            let max = require_param(spec, &params, "max")?;
            Ok(Box::new(UniformDistribution::new(min, max, rng)?))
        }
        "fixed" => {
            let value = require_param(spec, &params, "value")?;
            Ok(Box::new(FixedDistribution::new(value)))
        }
        other => Err(GraphError::InvalidParameter(format!(
            "unsupported distribution strategy: {}",
            other
        ))),
    }
}

fn parse_spec(spec: &str) -> Result<(String, HashMap<String, f64>), GraphError> {
    let spec = spec.trim();
    let open = spec.find('(').ok_or_else(|| invalid_spec(spec))?;
    if !spec.ends_with(')') {
        return Err(invalid_spec(spec));
    }
    let name = spec[..open].trim().to_string();
    let body = &spec[open + 1..spec.len() - 1];

    let mut params = HashMap::new();
    for part in body.split(',').filter(|p| !p.trim().is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| invalid_spec(spec))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| invalid_spec(spec))?;
        params.insert(key.trim().to_string(), value);
    }
    Ok((name, params))
}

fn require_param(spec: &str, params: &HashMap<String, f64>, key: &str) -> Result<f64, GraphError> {
    params.get(key).copied().ok_or_else(|| {
        GraphError::InvalidParameter(format!("distribution '{}' is missing '{}'", spec, key))
    })
}

fn invalid_spec(spec: &str) -> GraphError {
    GraphError::InvalidParameter(format!(
        "malformed distribution spec '{}', expected name(key=value,...)",
        spec
    ))
}
