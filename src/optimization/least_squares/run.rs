//! Execution helper that runs an `argmin` solver on a least-squares problem and
//! returns a crate-friendly [`FitOutcome`].
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        adapter::LsqAdapter,
        traits::{FitOutcome, LsqOptions, ResidualModel},
        types::{LsqState, Theta},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Run an `argmin` solver for a sum-of-squares problem.
///
/// This wires up:
/// - the user model via [`LsqAdapter`],
/// - the chosen `Solver` (Levenberg–Marquardt from
///   [`build_levenberg_marquardt`](crate::optimization::least_squares::solver::build_levenberg_marquardt)),
/// - the initial parameter `theta0`,
/// - `max_iters` and the optional wall-clock `timeout`,
/// - optional observers (behind the `obs_slog` feature),
///
/// then executes the solver and converts the result into [`FitOutcome`].
///
/// # Type Parameters
/// - `M`: the residual model implementing [`ResidualModel`].
/// - `S`: any `argmin` solver over `LsqAdapter<'a, M>` whose state is
///   [`LsqState`].
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time
/// pre-iteration line logs `S(θ₀)`.
///
/// # Returns
/// A [`FitOutcome`] with the best parameter found, its sum of squares,
/// termination status, iteration count, function-evaluation counts, and the
/// norm of the last `Jᵀr`.
///
/// # Errors
/// - Propagates any `argmin` runtime error (model failures, observer
///   failures) via `From<argmin::core::Error> for OptError`.
/// - Propagates validation errors raised while building [`FitOutcome`].
pub fn run_least_squares<'a, M, S>(
    theta0: Theta, opts: &LsqOptions, problem: LsqAdapter<'a, M>, solver: S,
) -> OptResult<FitOutcome>
where
    M: ResidualModel,
    S: argmin::core::Solver<LsqAdapter<'a, M>, LsqState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let max_iter = opts.tols.max_iter as u64;
    let mut optimizer =
        Executor::new(problem, solver).configure(|state| state.param(theta0).max_iters(max_iter));
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    FitOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<M>(theta0: &Theta, problem: &LsqAdapter<'_, M>) -> OptResult<()>
where
    M: ResidualModel,
{
    let sse0 = problem.cost(theta0)?;
    eprintln!("init: sse(theta0) = {:.6}, n_obs = {}", sse0, problem.n_obs());
    Ok(())
}
