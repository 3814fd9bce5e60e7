//! L-BFGS construction, one entry point per line search.
//!
//! Builders only apply `lbfgs_mem` and the two tolerances. θ₀ and the
//! iteration cap are runtime state and are set by `run::run_lbfgs`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// # Errors
/// argmin rejecting a tolerance, as `OptError::Backend`.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    with_line_search(HagerZhangLS::new(), opts)
}

/// # Errors
/// argmin rejecting a tolerance, as `OptError::Backend`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    with_line_search(MoreThuenteLS::new(), opts)
}

fn with_line_search<L>(
    line_search: L, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let memory = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(line_search, memory), opts)
}

/// Apply whichever of `tol_grad` / `tol_cost` is set; unset ones keep
/// argmin's defaults.
///
/// # Errors
/// argmin rejecting a tolerance, as `OptError::Backend`.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let solver = match opts.tols.tol_grad {
        Some(tol) => solver.with_tolerance_grad(tol)?,
        None => solver,
    };
    let solver = match opts.tols.tol_cost {
        Some(tol) => solver.with_tolerance_cost(tol)?,
        None => solver,
    };
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Solver construction for both line searches, with and without an
    // explicit history size, and tolerance wiring. Executor behavior is
    // covered by the model-level fit tests.
    // -------------------------------------------------------------------------

    fn opts_with(line_searcher: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        MLEOptions::new(tols, line_searcher, false, mem).expect("MLEOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with the default and with an explicit memory.
    fn builders_accept_default_and_explicit_memory() {
        assert!(build_optimizer_hager_zhang(&opts_with(LineSearcher::HagerZhang, None)).is_ok());
        assert!(
            build_optimizer_hager_zhang(&opts_with(LineSearcher::HagerZhang, Some(11))).is_ok()
        );
        assert!(build_optimizer_more_thuente(&opts_with(LineSearcher::MoreThuente, None)).is_ok());
        assert!(
            build_optimizer_more_thuente(&opts_with(LineSearcher::MoreThuente, Some(3))).is_ok()
        );
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` is a no-op when neither tolerance is set.
    //
    // Given
    // -----
    // - Tolerances carrying only `max_iter`.
    //
    // Expect
    // ------
    // - `Ok(_)`; Argmin defaults remain in effect.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
