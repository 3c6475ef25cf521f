//! Scalar root finders for monotone functions on a bracketing interval.
//!
//! Available functions:
//! - `root_newton_raphson()`
//! - `root_bisection()`
use num_traits::Float;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFindingError {
    #[error("iteration failed to converge")]
    FailedToConverge,
    #[error("maximum number of iterations reached")]
    MaxIterationsReached,
    #[error("derivative vanished")]
    ZeroDerivative,
}

/// Find a root of f(x) = 0 inside `[lo, hi]` with the Newton-Raphson method,
/// starting from the midpoint of the interval.
/// Iterates are clamped to the interval; an iterate pinned to a bound
/// that does not satisfy the tolerance is reported as non-convergence.
/// Terminates as soon as |f(x)| <= eps.
pub(crate) fn root_newton_raphson<F, Func, Deriv>(
    (lo, hi): (F, F),
    f: Func,
    d: Deriv,
    eps: F,
    max_iter: usize,
) -> Result<F, RootFindingError>
where
    F: Float,
    Func: Fn(F) -> F,
    Deriv: Fn(F) -> F,
{
    let clamp_t = |t: F| t.max(lo).min(hi);

    let mut x = lo + (hi - lo) / (F::one() + F::one());
    for _ in 0..max_iter {
        let fx = f(x);
        if fx.abs() <= eps {
            return Ok(x);
        }
        let dx = d(x);
        if dx.abs() <= F::epsilon() {
            return Err(RootFindingError::ZeroDerivative);
        }
        let x1 = x - fx / dx;
        if x1.is_nan() {
            return Err(RootFindingError::FailedToConverge);
        }
        let x1 = clamp_t(x1);
        if x1 == x {
            return Err(RootFindingError::FailedToConverge);
        }
        x = x1;
    }
    Err(RootFindingError::MaxIterationsReached)
}

/// Find a root of f(x) = 0 inside `[lo, hi]` by halving the interval, keeping the half
/// whose endpoints have opposite signs. Returns the first midpoint with |f(mid)| <= eps.
pub(crate) fn root_bisection<F, Func>(
    (mut lo, mut hi): (F, F),
    f: Func,
    eps: F,
    max_iter: usize,
) -> Result<F, RootFindingError>
where
    F: Float,
    Func: Fn(F) -> F,
{
    let two = F::one() + F::one();
    let mut f_lo = f(lo);
    for _ in 0..max_iter {
        let mid = lo + (hi - lo) / two;
        let f_mid = f(mid);
        if f_mid.abs() <= eps {
            return Ok(mid);
        }
        if f_mid.is_nan() || mid == lo || mid == hi {
            return Err(RootFindingError::FailedToConverge);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(RootFindingError::MaxIterationsReached)
}
