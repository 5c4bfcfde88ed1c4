use serde::{Deserialize, Serialize};

use crate::constants::DIVERGENCE_SMOOTHING;

/// Distance between the topic fingerprints of two interactions.
///
/// Any `Fn(&[f64], &[f64]) -> f64` closure is a distance as well.
pub trait IDistance: Send + Sync {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> IDistance for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Built-in distance functions selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceKind {
    #[default]
    Cosine,
    Euclidean,
    /// Kullback-Leibler divergence of the normalized distributions.
    Entropy,
    Hellinger,
}

impl DistanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceKind::Cosine => "cosine",
            DistanceKind::Euclidean => "euclidean",
            DistanceKind::Entropy => "entropy",
            DistanceKind::Hellinger => "hellinger",
        }
    }
}

impl IDistance for DistanceKind {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceKind::Cosine => cosine(a, b),
            DistanceKind::Euclidean => euclidean(a, b),
            DistanceKind::Entropy => kl_divergence(a, b),
            DistanceKind::Hellinger => hellinger(a, b),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// `1 - cos(a, b)`. A zero vector is maximally distant from everything.
fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).max(0.0)
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn normalize(v: &[f64]) -> Vec<f64> {
    let total: f64 = v.iter().sum();
    if total <= 0.0 {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| x / total).collect()
}

fn kl_divergence(a: &[f64], b: &[f64]) -> f64 {
    let p = normalize(a);
    let q = normalize(b);
    p.iter()
        .zip(&q)
        .filter(|(pi, _)| **pi > 0.0)
        .map(|(pi, qi)| pi * (pi / (qi + DIVERGENCE_SMOOTHING)).ln())
        .sum::<f64>()
        .max(0.0)
}

fn hellinger(a: &[f64], b: &[f64]) -> f64 {
    let p = normalize(a);
    let q = normalize(b);
    let sum: f64 = p
        .iter()
        .zip(&q)
        .map(|(pi, qi)| (pi.sqrt() - qi.sqrt()).powi(2))
        .sum();
    (0.5 * sum).sqrt()
}
