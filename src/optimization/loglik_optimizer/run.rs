//! Drives one L-BFGS run through argmin's `Executor` and converts the final
//! solver state into an [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Solver state shared by both pre-wired L-BFGS variants.
pub type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Run `solver` on `problem` starting at `theta0`.
///
/// `opts.tols.max_iter` caps the iteration count. With the `obs_slog`
/// feature and `opts.verbose`, ℓ(θ₀) is logged and a terminal slog observer
/// reports every iteration.
///
/// # Errors
/// - Failures raised inside argmin (including adapter errors) via
///   `From<argmin::core::Error>`.
/// - `MissingThetaHat` / `InvalidThetaHat` / `NonFiniteCost` when the final
///   state cannot be turned into an [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_start(&theta0, &problem)?;
    }

    let max_iter = opts.tols.max_iter;
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(n) => state.max_iters(n as u64),
            None => state,
        }
    });

    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        )
    } else {
        executor
    };

    let result = executor.run()?;
    into_outcome(result.state().clone())
}

fn into_outcome(mut state: LbfgsState) -> OptResult<OptimOutcome> {
    let iterations = state.get_iter();
    let fn_evals = state.get_func_counts().clone();
    let status = state.get_termination_status().clone();
    let best_ll = -state.get_best_cost();
    let grad = state.take_gradient();
    OptimOutcome::new(state.take_best_param(), best_ll, status, iterations, fn_evals, grad)
}

#[cfg(feature = "obs_slog")]
fn log_start<F: LogLikelihood>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()> {
    let ll0 = -problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g) => log::info!("start: ell(theta0) = {ll0:.6}, |grad| = {:.6}", g.l2_norm()),
        Err(_) => log::info!("start: ell(theta0) = {ll0:.6}"),
    }
    Ok(())
}
