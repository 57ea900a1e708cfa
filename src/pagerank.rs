//! PageRank via damped power iteration.

use crate::matrix::{build_transition, LinkMatrix, TransitionMatrix};
use crate::topk::top_k;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankRun {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// `+inf` when no step ran; serialized as `null` in that case.
    #[cfg_attr(feature = "serde", serde(with = "residual"))]
    pub diff_l1: f64,
    pub converged: bool,
}

/// JSON has no infinity, so a non-finite residual travels as `null`.
#[cfg(feature = "serde")]
mod residual {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        value.is_finite().then_some(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl PageRankRun {
    /// The `k` highest-scoring pages, best first.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        top_k(&self.scores, k)
    }
}

/// Solver parameters.
///
/// Defaults: `damping = 0.85`, `max_iterations = 100`, `tolerance = 1e-6`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Probability of following a link rather than jumping to a uniformly random page.
    pub damping: f64,
    /// Upper bound on update steps.
    pub max_iterations: usize,
    /// Stop once the \(L_1\) distance between successive rank vectors drops below this.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl PageRankConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() {
            return Err(Error::ParameterOutOfRange(
                "damping must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::ParameterOutOfRange(format!(
                "damping must be in [0,1] (got {})",
                self.damping
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::ParameterOutOfRange(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::ParameterOutOfRange(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// One iteration boundary, as reported by [`solve_observed`].
#[derive(Debug, Clone, Copy)]
pub struct Iteration<'a> {
    /// 0 for the initial uniform vector, then 1, 2, ... per update step.
    pub index: usize,
    pub rank: &'a [f64],
    /// \(L_1\) distance to the previous rank vector; `None` at index 0.
    pub diff_l1: Option<f64>,
}

/// Build the transition matrix for `links` and solve it.
pub fn pagerank(links: &LinkMatrix, config: PageRankConfig) -> PageRankRun {
    solve(&build_transition(links), config)
}

/// Checked end-to-end PageRank from raw adjacency rows.
///
/// The config is validated first, then the rows; nothing is iterated on failure.
pub fn pagerank_checked(rows: &[Vec<f64>], config: PageRankConfig) -> Result<PageRankRun> {
    config.validate()?;
    let links = LinkMatrix::from_rows(rows)?;
    Ok(pagerank(&links, config))
}

/// Checked power iteration.
///
/// This validates `config` and rejects nonsensical numeric settings before iterating.
pub fn solve_checked(transition: &TransitionMatrix, config: PageRankConfig) -> Result<PageRankRun> {
    config.validate()?;
    Ok(solve(transition, config))
}

/// Power iteration with convergence reporting.
///
/// `iterations` is the number of update steps performed.
/// `diff_l1` is the final \(L_1\) residual (`+inf` if no step ran).
/// Exhausting `max_iterations` returns the last iterate with `converged = false`.
pub fn solve(transition: &TransitionMatrix, config: PageRankConfig) -> PageRankRun {
    solve_observed(transition, config, |_| {})
}

/// Like [`solve`], calling `observe` at every iteration boundary, starting with the
/// initial uniform vector.
pub fn solve_observed<F>(
    transition: &TransitionMatrix,
    config: PageRankConfig,
    mut observe: F,
) -> PageRankRun
where
    F: FnMut(&Iteration<'_>),
{
    let n = transition.size();
    let teleport = vec![1.0 / n as f64; n];
    let mut rank = teleport.clone();
    let mut new_rank = vec![0.0; n];
    observe(&Iteration {
        index: 0,
        rank: &rank,
        diff_l1: None,
    });

    let mut iters = 0usize;
    let mut last_diff = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iters += 1;
        damped_step(transition, &rank, &teleport, config.damping, &mut new_rank);
        let diff = l1_distance(&rank, &new_rank);
        last_diff = diff;
        std::mem::swap(&mut rank, &mut new_rank);
        tracing::trace!(iteration = iters, diff_l1 = diff, "power iteration step");
        observe(&Iteration {
            index: iters,
            rank: &rank,
            diff_l1: Some(diff),
        });
        if diff < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::debug!(iterations = iters, diff_l1 = last_diff, "pagerank converged");
    } else {
        tracing::warn!(
            max_iterations = config.max_iterations,
            diff_l1 = last_diff,
            "pagerank reached max_iterations without converging"
        );
    }
    PageRankRun {
        scores: rank,
        iterations: iters,
        diff_l1: last_diff,
        converged,
    }
}

/// `out = (1 - damping) * teleport + damping * (transition · rank)`.
///
/// Rows are independent; each row's dot product runs in a fixed order, so the
/// parallel path gives the same bits as the serial one.
fn damped_step(
    transition: &TransitionMatrix,
    rank: &[f64],
    teleport: &[f64],
    damping: f64,
    out: &mut [f64],
) {
    let update = |(i, slot): (usize, &mut f64)| {
        let linked: f64 = transition
            .row(i)
            .iter()
            .zip(rank)
            .map(|(p, r)| p * r)
            .sum();
        *slot = (1.0 - damping) * teleport[i] + damping * linked;
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_iter_mut().enumerate().for_each(update);
    }
    #[cfg(not(feature = "parallel"))]
    out.iter_mut().enumerate().for_each(update);
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
