//! Estimation options for CJS models.
use crate::optimization::loglik_optimizer::MLEOptions;

/// How per-individual forward passes are scheduled.
///
/// Both modes reduce contributions in individual order and produce
/// bit-identical objective values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    #[default]
    Serial,
    /// Map individuals on the global rayon pool.
    Parallel,
}

/// `CJSOptions` — optimizer configuration plus evaluation scheduling.
///
/// Fields
/// ------
/// - `mle_opts`: [`MLEOptions`] forwarded to the L-BFGS driver.
/// - `eval_mode`: [`EvalMode`] used for every likelihood and gradient
///   evaluation during the fit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CJSOptions {
    pub mle_opts: MLEOptions,
    pub eval_mode: EvalMode,
}

impl CJSOptions {
    pub fn new(mle_opts: MLEOptions, eval_mode: EvalMode) -> Self {
        Self { mle_opts, eval_mode }
    }
}
