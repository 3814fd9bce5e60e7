//! rust_capture_recapture — Cormack–Jolly–Seber likelihoods and MLE in Rust.
//!
//! Purpose
//! -------
//! Serve as the crate root for the capture-recapture survival stack: a
//! differentiable hidden-Markov negative log-likelihood for capture
//! histories, and the argmin-backed optimizer that fits it.
//!
//! Key behaviors
//! -------------
//! - [`cjs`]: data validation, logit link, transition / emission matrices,
//!   forward recursion, likelihood aggregation, and the [`cjs::CJSModel`]
//!   that implements the optimizer's `LogLikelihood` trait.
//! - [`optimization`]: L-BFGS maximization of any `LogLikelihood`
//!   (line-search choice, tolerances, finite-difference fallback gradients)
//!   plus numerically stable logistic / logit helpers.
//!
//! Conventions
//! -----------
//! - Capture grids are occasions × individuals; grid indices are 0-based,
//!   first-capture occasions are 1-based as in the usual data files.
//! - Models are fitted in an unconstrained θ-space; probabilities are
//!   reported through `CJSFittedParams`.
//! - Library code logs through the `log` facade only; installing a logger is
//!   left to the application.
//!
//! Example
//! -------
//! ```rust
//! use ndarray::array;
//! use rust_capture_recapture::cjs::prelude::*;
//!
//! let data = CJSData::from_codes(
//!     &array![[1, 1, 1], [1, 0, 1], [0, 0, 1]],
//!     &array![1, 1, 2],
//!     &array![1, 1, 1],
//! )
//! .unwrap();
//! let model = CJSModel::new(ModelVariant::TimeConstant, CJSOptions::default());
//! let theta = model.theta_from_probs(0.8, 0.6, &data);
//! let nll = model.nll(&theta, &data).unwrap();
//! assert!(nll.is_finite() && nll > 0.0);
//! ```

pub mod cjs;
pub mod optimization;
