// src/ops/mod.rs
//! # Scalar operations
//!
//! Arithmetic lives directly on [`Value`](crate::autograd::Value); this module holds
//! the closed set of activation functions that the graph dispatches on.

pub mod activation;

pub use activation::Activation;
