//! Numeric aliases for the optimizer and the two L-BFGS configurations it
//! can run.
//!
//! Only `f64` crosses into this layer. The likelihood engine is generic, but
//! `CJSModel` evaluates it on `f64` (values) or `Dual` (gradients) and hands
//! back plain floats.
use std::collections::HashMap;

use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;

/// Parameters on the logit scale.
pub type Theta = Array1<f64>;
pub type Grad = Array1<f64>;
/// `ℓ(θ)` on the model side, `-ℓ(θ)` inside argmin.
pub type Cost = f64;
/// argmin's evaluation counters, keyed `"cost_count"`, `"gradient_count"`.
pub type FnEvalMap = HashMap<String, u64>;

/// Correction pairs kept by L-BFGS when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
