//! Dense square matrices for link structure and transition probabilities.
//!
//! Both types keep their entries in a flat row-major buffer. Entry `(i, j)` sits in row `i`,
//! column `j`, and a column describes one source page's outgoing links.

use crate::{Error, Result};

/// Maximum deviation from 1.0 allowed for a transition column sum.
pub const COLUMN_SUM_TOLERANCE: f64 = 1e-9;

/// Flatten `rows` into a row-major buffer, rejecting empty, ragged, non-finite or
/// negative input.
fn flatten_checked(rows: &[Vec<f64>]) -> Result<(usize, Vec<f64>)> {
    let n = rows.len();
    if n == 0 {
        return Err(Error::InvalidInput(
            "matrix must have at least one row".to_string(),
        ));
    }
    let mut data = Vec::with_capacity(n * n);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            return Err(Error::InvalidInput(format!(
                "matrix must be square (row {i} has {} entries, expected {n})",
                row.len()
            )));
        }
        for (j, &x) in row.iter().enumerate() {
            if !x.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "entry ({i}, {j}) must be finite"
                )));
            }
            if x < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "entry ({i}, {j}) must be non-negative (got {x})"
                )));
            }
            data.push(x);
        }
    }
    Ok((n, data))
}

/// Directed link structure: a nonzero entry `(i, j)` means page `j` links to page `i`.
///
/// Only the zero/nonzero pattern matters; weights are not carried into the transition
/// matrix. A column `[2, 1]` splits its mass `[1/2, 1/2]`, not `[2/3, 1/3]` as a
/// weight-proportional split would.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkMatrix {
    n: usize,
    data: Vec<f64>,
}

impl LinkMatrix {
    /// Build from rows (`rows[i][j]` = link from `j` to `i`).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let (n, data) = flatten_checked(rows)?;
        Ok(Self { n, data })
    }

    /// Number of pages.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Number of pages `source` links to (nonzero entries in its column).
    pub fn out_degree(&self, source: usize) -> usize {
        (0..self.n).filter(|&i| self.get(i, source) != 0.0).count()
    }

    /// Pages with no outgoing links.
    pub fn dangling_nodes(&self) -> Vec<usize> {
        (0..self.n).filter(|&j| self.out_degree(j) == 0).collect()
    }
}

/// Column-stochastic matrix: entry `(i, j)` is the probability of moving from page `j` to
/// page `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    n: usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    /// Validated construction from caller-supplied probabilities.
    ///
    /// Besides shape and finiteness, every column must sum to 1 within
    /// [`COLUMN_SUM_TOLERANCE`].
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let (n, data) = flatten_checked(rows)?;
        let matrix = Self { n, data };
        for j in 0..n {
            let sum = matrix.column_sum(j);
            if (sum - 1.0).abs() > COLUMN_SUM_TOLERANCE {
                return Err(Error::InvalidInput(format!(
                    "column {j} must sum to 1 (got {sum})"
                )));
            }
        }
        Ok(matrix)
    }

    /// Normalize each column of `links` by its out-degree.
    ///
    /// Dangling columns become uniform (`1/n`), so no column is ever zero and no division
    /// by zero happens.
    pub fn from_links(links: &LinkMatrix) -> Self {
        let n = links.size();
        let uniform = 1.0 / n as f64;
        let mut data = vec![0.0; n * n];
        let mut dangling = 0usize;
        for j in 0..n {
            let out_degree = links.out_degree(j);
            if out_degree == 0 {
                dangling += 1;
                for i in 0..n {
                    data[i * n + j] = uniform;
                }
            } else {
                let share = 1.0 / out_degree as f64;
                for i in 0..n {
                    if links.get(i, j) != 0.0 {
                        data[i * n + j] = share;
                    }
                }
            }
        }
        tracing::debug!(n, dangling, "built transition matrix");
        Self { n, data }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Row `i`: the probabilities of arriving at page `i` from each source page.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn column_sum(&self, col: usize) -> f64 {
        (0..self.n).map(|i| self.get(i, col)).sum()
    }
}

/// Build the column-stochastic transition matrix for `adjacency`.
pub fn build_transition(adjacency: &LinkMatrix) -> TransitionMatrix {
    TransitionMatrix::from_links(adjacency)
}

/// Checked variant of [`build_transition`] taking raw rows.
///
/// Rejects empty, non-square, non-finite or negative input with [`Error::InvalidInput`].
pub fn build_transition_checked(rows: &[Vec<f64>]) -> Result<TransitionMatrix> {
    let links = LinkMatrix::from_rows(rows)?;
    Ok(build_transition(&links))
}
