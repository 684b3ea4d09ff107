//! Evaluation pipeline for the spread node kernels.
//!
//! The `eval` module turns named input spreads into named output spreads,
//! one pure pass per node per frame. The submodules keep the concerns
//! isolated:
//!
//! - [`width`] holds the broadcasting width and grouping rules shared by
//!   every kernel, including the guarded zero-length fallbacks.
//! - [`numeric`] holds the per-group math.
//! - [`eval_node`] dispatches per [`NodeType`](crate::types::NodeType) and
//!   drives the write-then-finalize protocol on the output spreads.
//!
//! Hosts interact with [`evaluate`] only.

pub mod eval_node;
mod numeric;
pub mod width;

pub use eval_node::{evaluate, EvalError};
pub use width::GroupRounding;
