//! `maximize`: the one call models make to fit themselves.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `ℓ(θ)` from `theta0` with L-BFGS.
///
/// `f.check` runs first, so structural problems with θ₀ or the data are
/// reported before the solver starts. The line search is taken from
/// `opts.line_searcher`.
///
/// # Errors
/// Anything from `f.check`, the solver builders, or the run itself.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_capture_recapture::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize},
/// };
///
/// // ℓ(θ) = -|θ - 1|², maximized at θ = (1, 1).
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.mapv(|t| (t - 1.0).powi(2)).sum())
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.0, 3.0], &(), &MLEOptions::default())?;
/// assert!(out.theta_hat.iter().all(|t| (t - 1.0).abs() < 1e-4));
/// # Ok::<(), rust_capture_recapture::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::HagerZhang => {
            run_lbfgs(theta0, opts, problem, build_optimizer_hager_zhang(opts)?)
        }
        LineSearcher::MoreThuente => {
            run_lbfgs(theta0, opts, problem, build_optimizer_more_thuente(opts)?)
        }
    }
}
