//! `linkrank`: PageRank over dense link matrices.
//!
//! Two stages, run in sequence:
//! - [`build_transition`] turns a square link matrix into a column-stochastic
//!   [`TransitionMatrix`]. Pages without outgoing links get a uniform column.
//! - [`solve`] runs damped power iteration on that matrix and returns the scores plus
//!   convergence metadata ([`PageRankRun`]).
//!
//! Public invariants (must not drift):
//! - **Orientation**: entry `(i, j)` means "page `j` links to page `i`" (row = destination,
//!   column = source), for link and transition matrices alike.
//! - **Mass**: every transition column sums to 1, and the rank vector sums to 1 at every
//!   iteration boundary.
//! - **Determinism**: identical inputs + configs give bit-identical scores.
//! - **Non-convergence is an outcome**: it is reported via [`PageRankRun::converged`], not
//!   as an [`Error`].
//!
//! Swappable (allowed to change without breaking the contract):
//! - serial vs parallel (`parallel` feature) matrix-vector product
//! - internal storage (dense row-major today)

pub mod matrix;
pub mod pagerank;
pub mod topk;

pub use matrix::{build_transition, build_transition_checked, LinkMatrix, TransitionMatrix};
pub use pagerank::{pagerank, pagerank_checked, PageRankConfig, PageRankRun};
pub use pagerank::{solve, solve_checked, solve_observed, Iteration};
pub use topk::top_k;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parameter out of range: {0}")]
    ParameterOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, Error>;
