//! Adaptive subdivision driver: cubic Bezier curve → chain of biarcs.
//!
//! The parameter range [0, 1] is processed depth first from an explicit work
//! stack. Each span is approximated by a [`Biarc`]; the junction solver finds
//! the curve parameter t* facing the biarc junction G, and the span is either
//! accepted (both arcs are emitted) or split at t* into two new spans.

use alloc::vec::Vec;
use core::f64::consts::PI;

use log::{debug, trace};
use num_traits::Float;
use tinyvec::ArrayVec;

use super::*;
use crate::error::{GeometryError, InvalidInput};
use crate::roots::{root_bisection, root_newton_raphson};

/// Capacity of the work stack. Depth first processing keeps at most one
/// sibling per level pending, plus the unprocessed pieces between inflections.
const STACK_CAPACITY: usize = 64;

/// Upper bound for `FitConfig::max_depth`
pub const MAX_SUBDIVISION_DEPTH: usize = STACK_CAPACITY - 4;

/// The junction solver stops at this fraction of the allowable error when
/// that is tighter than its configured tolerance.
const SOLVER_TOLERANCE_RATIO: NativeFloat = 1e-2;

/// Number of steps used to measure the net turning of an input curve
const TURNING_STEPS: usize = 64;

/// A parameter range [start, end] of the input curve
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Span {
    pub start: NativeFloat,
    pub end: NativeFloat,
}

impl Span {
    pub const fn new(start: NativeFloat, end: NativeFloat) -> Self {
        Span { start, end }
    }

    /// Parameter at fraction `u` of the span
    pub fn lerp(&self, u: NativeFloat) -> NativeFloat {
        self.start + (self.end - self.start) * u
    }
}

/// Root finder used to locate the junction parameter t*.
/// Either tolerance is capped at a hundredth of the allowable error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JunctionSolver {
    /// Newton-Raphson from the span midpoint, stopping at |f(t)| <= tolerance
    Newton { tolerance: NativeFloat },
    /// Interval halving, stopping at |f(mid)| <= tolerance
    Bisection { tolerance: NativeFloat },
}

impl JunctionSolver {
    pub const fn newton() -> Self {
        JunctionSolver::Newton { tolerance: 1e-3 }
    }

    pub const fn bisection() -> Self {
        JunctionSolver::Bisection { tolerance: 1e-9 }
    }
}

impl Default for JunctionSolver {
    fn default() -> Self {
        Self::newton()
    }
}

/// Tuning knobs of the fitting process.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitConfig {
    /// Magnitude below which a determinant, area or perimeter counts as zero.
    pub epsilon: NativeFloat,

    /// Root finder for the junction parameter.
    pub solver: JunctionSolver,

    /// Iteration cap of the junction solver.
    pub max_iterations: usize,

    /// Maximum subdivision depth, clamped to [`MAX_SUBDIVISION_DEPTH`].
    pub max_depth: usize,

    /// Number of interior curve samples per span checked against the biarc
    /// in addition to the junction point. 0 measures the junction only.
    pub deviation_samples: usize,

    /// Reject curves whose tangent turns by pi or more between two inflections.
    pub reject_excessive_turning: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            solver: JunctionSolver::default(),
            max_iterations: 100,
            max_depth: 48,
            deviation_samples: 16,
            reject_excessive_turning: true,
        }
    }
}

impl FitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, epsilon: NativeFloat) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn solver(mut self, solver: JunctionSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn deviation_samples(mut self, samples: usize) -> Self {
        self.deviation_samples = samples;
        self
    }

    pub fn reject_excessive_turning(mut self, reject: bool) -> Self {
        self.reject_excessive_turning = reject;
        self
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Pending {
    span: Span,
    depth: usize,
}

/// Approximates `curve` by circular arcs deviating at most `allowable_error`
/// from it, using the default [`FitConfig`].
///
/// The curve is first cut at its inflection points, then every piece is
/// subdivided on its own. The arcs are returned in curve traversal order,
/// two per accepted biarc.
pub fn fit_arcs(curve: &CubicBezier, allowable_error: NativeFloat) -> Result<Vec<Arc>, Error> {
    fit_arcs_with(curve, allowable_error, &FitConfig::default())
}

/// Same as [`fit_arcs`] with an explicit configuration
pub fn fit_arcs_with(
    curve: &CubicBezier,
    allowable_error: NativeFloat,
    config: &FitConfig,
) -> Result<Vec<Arc>, Error> {
    let mut arcs = Vec::new();
    fit_arcs_into(curve, allowable_error, config, &mut arcs)?;
    Ok(arcs)
}

/// Same as [`fit_arcs_with`], writing into a caller owned container.
///
/// `arcs` is cleared first and stays empty if the fit fails.
pub fn fit_arcs_into(
    curve: &CubicBezier,
    allowable_error: NativeFloat,
    config: &FitConfig,
    arcs: &mut Vec<Arc>,
) -> Result<(), Error> {
    arcs.clear();
    let result = validate(curve, allowable_error, config)
        .and_then(|pieces| subdivide(curve, &pieces, allowable_error, config, arcs));
    if result.is_err() {
        arcs.clear();
    }
    result
}

/// Checks the input and returns the parameter ranges between inflections
fn validate(
    curve: &CubicBezier,
    allowable_error: NativeFloat,
    config: &FitConfig,
) -> Result<ArrayVec<[Span; 3]>, Error> {
    // also catches NaN
    if !(allowable_error > 0.0) {
        return Err(InvalidInput::NonPositiveTolerance(allowable_error).into());
    }
    if !curve.is_finite() {
        return Err(InvalidInput::NonFiniteCoordinate.into());
    }
    if curve.is_a_point(config.epsilon) {
        return Err(Error::DegenerateGeometry {
            cause: GeometryError::DegenerateTriangle,
            span: Span::new(0.0, 1.0),
        });
    }

    let mut pieces: ArrayVec<[Span; 3]> = ArrayVec::new();
    let mut start = 0.0;
    for t in curve.inflections(config.epsilon) {
        pieces.push(Span::new(start, t));
        start = t;
    }
    pieces.push(Span::new(start, 1.0));
    if pieces.len() > 1 {
        debug!("curve split at {} inflection(s)", pieces.len() - 1);
    }

    if config.reject_excessive_turning {
        for piece in &pieces {
            let turning = curve.turning_between(piece.start, piece.end, TURNING_STEPS);
            if turning.abs() >= PI {
                return Err(InvalidInput::ExcessiveTurning(turning).into());
            }
        }
    }
    Ok(pieces)
}

fn subdivide(
    curve: &CubicBezier,
    pieces: &[Span],
    allowable_error: NativeFloat,
    config: &FitConfig,
    arcs: &mut Vec<Arc>,
) -> Result<(), Error> {
    let max_depth = config.max_depth.min(MAX_SUBDIVISION_DEPTH);
    let mut pending: ArrayVec<[Pending; STACK_CAPACITY]> = ArrayVec::new();
    for &span in pieces.iter().rev() {
        pending.push(Pending { span, depth: 0 });
    }
    let mut deepest = 0;

    while let Some(Pending { span, depth }) = pending.pop() {
        deepest = deepest.max(depth);

        let biarc = Biarc::new(curve, span, config.epsilon)?;
        let t = solve_junction(curve, &biarc, allowable_error, config)?;
        let pair = biarc.arcs();
        let deviation = measure_deviation(curve, &biarc, &pair, t, config.deviation_samples);

        if deviation <= allowable_error {
            trace!(
                "accept t = [{}, {}] at depth {}, deviation {}",
                span.start,
                span.end,
                depth,
                deviation
            );
            arcs.extend_from_slice(&pair);
            continue;
        }

        if depth >= max_depth {
            return Err(Error::SubdivisionLimitExceeded { span, max_depth });
        }
        trace!(
            "split t = [{}, {}] at {}, deviation {}",
            span.start,
            span.end,
            t,
            deviation
        );
        // right half below the left one so arcs come out in parameter order
        for half in [Span::new(t, span.end), Span::new(span.start, t)] {
            let overflow = pending.try_push(Pending {
                span: half,
                depth: depth + 1,
            });
            if overflow.is_some() {
                return Err(Error::SubdivisionLimitExceeded { span, max_depth });
            }
        }
    }

    debug!("fitted {} arcs, subdivision depth {}", arcs.len(), deepest);
    Ok(())
}

/// Finds t* in the span of `biarc` where (Q(t) - G) · H = 0.
///
/// f is measured in curve units, so the stopping tolerance follows
/// `allowable_error` on curves drawn at a small scale.
pub fn solve_junction(
    curve: &CubicBezier,
    biarc: &Biarc,
    allowable_error: NativeFloat,
    config: &FitConfig,
) -> Result<NativeFloat, Error> {
    let span = biarc.span();
    let g = biarc.junction();
    let h = biarc.junction_tangent();
    let f = |t: NativeFloat| (curve.eval(t) - g).dot(h);
    let cap = allowable_error * SOLVER_TOLERANCE_RATIO;

    let root = match config.solver {
        JunctionSolver::Newton { tolerance } => root_newton_raphson(
            (span.start, span.end),
            f,
            |t: NativeFloat| curve.eval_derivative(t).dot(h),
            tolerance.min(cap),
            config.max_iterations,
        ),
        JunctionSolver::Bisection { tolerance } => root_bisection(
            (span.start, span.end),
            f,
            tolerance.min(cap),
            config.max_iterations,
        ),
    };
    root.map_err(|cause| Error::ConvergenceFailure { cause, span })
}

/// Largest distance between the curve and the biarc: at the junction parameter
/// and at `samples` evenly spaced interior parameters of the span.
fn measure_deviation(
    curve: &CubicBezier,
    biarc: &Biarc,
    pair: &[Arc; 2],
    junction_t: NativeFloat,
    samples: usize,
) -> NativeFloat {
    let span = biarc.span();
    let mut deviation = curve.eval(junction_t).distance(biarc.junction());
    for i in 1..=samples {
        let p = curve.eval(span.lerp(i as NativeFloat / (samples + 1) as NativeFloat));
        let nearest = pair[0].distance_to_point(p).min(pair[1].distance_to_point(p));
        deviation = deviation.max(nearest);
    }
    deviation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roots::RootFindingError;

    fn gentle() -> CubicBezier {
        let h = 3f64.sqrt() / 4.0;
        CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.25, h),
            Point2::new(0.75, h),
            Point2::new(2.0, 0.0),
        )
    }

    fn spiral() -> CubicBezier {
        CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 50.0),
            Point2::new(100.0, 100.0),
            Point2::new(150.0, 100.0),
        )
    }

    fn flat() -> CubicBezier {
        CubicBezier::new(
            Point2::new(40.0, 112.5),
            Point2::new(62.0, 112.775),
            Point2::new(80.225, 113.225),
            Point2::new(80.5, 113.5),
        )
    }

    fn line() -> CubicBezier {
        CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 3.0),
        )
    }

    #[test]
    fn gentle_curve_single_biarc() {
        let arcs = fit_arcs(&gentle(), 0.1).unwrap();
        assert_eq!(arcs.len(), 2);
        for arc in &arcs {
            assert!(arc.radius().is_finite());
            assert!(arc.radius() > 0.0);
        }
    }

    #[test]
    fn bisection_solver_agrees() {
        let config = FitConfig::new().solver(JunctionSolver::bisection());
        assert_eq!(fit_arcs_with(&gentle(), 0.1, &config).unwrap().len(), 2);
        assert_eq!(fit_arcs_with(&spiral(), 0.01, &config).unwrap().len(), 18);
    }

    #[test]
    fn collinear_curve_is_degenerate() {
        let err = fit_arcs(&line(), 0.1).unwrap_err();
        assert_eq!(
            err,
            Error::DegenerateGeometry {
                cause: GeometryError::ParallelLines,
                span: Span::new(0.0, 1.0)
            }
        );
        assert_eq!(err.span(), Some(Span::new(0.0, 1.0)));
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = Point2::new(3.0, 4.0);
        let err = fit_arcs(&CubicBezier::new(p, p, p, p), 0.1).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry { .. }));
    }

    #[test]
    fn tighter_tolerance_never_fewer_arcs() {
        for curve in [gentle(), spiral(), flat()] {
            let mut previous = 0;
            for tolerance in [1.0, 0.5, 0.1, 0.05, 0.01, 0.005, 0.001] {
                let count = fit_arcs(&curve, tolerance).unwrap().len();
                assert!(count >= previous);
                assert_eq!(count % 2, 0);
                previous = count;
            }
        }
        let coarse = fit_arcs(&gentle(), 0.1).unwrap().len();
        let fine = fit_arcs(&gentle(), 0.001).unwrap().len();
        assert!(fine > coarse);
    }

    #[test]
    fn biarcs_are_continuous() {
        for (curve, tolerance) in [(gentle(), 0.001), (spiral(), 0.01), (flat(), 0.001)] {
            let arcs = fit_arcs(&curve, tolerance).unwrap();
            for pair in arcs.chunks(2) {
                assert!(pair[0].end_point().distance(pair[1].start_point()) < 1e-9);
            }
            for consecutive in arcs.windows(2) {
                assert!(consecutive[0].end_point().distance(consecutive[1].start_point()) < 1e-9);
            }
        }
    }

    #[test]
    fn chain_interpolates_endpoints() {
        for (curve, tolerance) in [(gentle(), 0.01), (spiral(), 0.1), (flat(), 0.01)] {
            let arcs = fit_arcs(&curve, tolerance).unwrap();
            let first = arcs.first().unwrap();
            let last = arcs.last().unwrap();
            assert!(first.start_point().distance(curve.start()) < 1e-9);
            assert!(last.end_point().distance(curve.end()) < 1e-9);
        }
    }

    #[test]
    fn deviation_within_tolerance() {
        for (curve, tolerance) in [
            (gentle(), 0.1),
            (gentle(), 0.01),
            (gentle(), 0.001),
            (spiral(), 0.1),
            (spiral(), 0.01),
            (flat(), 0.01),
        ] {
            let arcs = fit_arcs(&curve, tolerance).unwrap();
            let nsteps = 2000;
            for t in 0..=nsteps {
                let p = curve.eval(t as f64 / nsteps as f64);
                let nearest = arcs
                    .iter()
                    .map(|arc| arc.distance_to_point(p))
                    .fold(f64::INFINITY, |a, b| a.min(b));
                assert!(nearest <= tolerance);
            }
        }
    }

    #[test]
    fn angles_are_normalized() {
        for (curve, tolerance) in [(gentle(), 0.001), (spiral(), 0.001), (flat(), 0.001)] {
            for arc in fit_arcs(&curve, tolerance).unwrap() {
                assert!(arc.start_angle().abs() <= PI);
                assert!(arc.end_angle() >= arc.start_angle() - PI);
                assert!(arc.end_angle() <= arc.start_angle() + PI);
                assert_eq!(arc.is_clockwise(), arc.end_angle() < arc.start_angle());
            }
        }
    }

    #[test]
    fn quarter_circle_is_one_circle() {
        let c = 0.551915024494;
        let bezier = CubicBezier::new(
            Point2::new(0.0, 1.0),
            Point2::new(c, 1.0),
            Point2::new(1.0, c),
            Point2::new(1.0, 0.0),
        );
        let arcs = fit_arcs(&bezier, 0.001).unwrap();
        assert_eq!(arcs.len(), 2);
        for arc in &arcs {
            assert!(arc.center().length() < 1e-9);
            assert!((arc.radius() - 1.0).abs() < 1e-9);
            assert!(arc.is_clockwise());
        }
    }

    #[test]
    fn junction_only_measure() {
        let config = FitConfig::new().deviation_samples(0);
        assert_eq!(fit_arcs_with(&spiral(), 0.1, &config).unwrap().len(), 6);
        assert_eq!(fit_arcs(&spiral(), 0.1).unwrap().len(), 10);
    }

    #[test]
    fn rejects_invalid_tolerance() {
        for tolerance in [0.0, -1.0, f64::NAN] {
            let err = fit_arcs(&gentle(), tolerance).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidInput(InvalidInput::NonPositiveTolerance(_))
            ));
            assert_eq!(err.span(), None);
        }
    }

    #[test]
    fn rejects_non_finite_points() {
        let bezier = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        );
        assert_eq!(
            fit_arcs(&bezier, 0.1),
            Err(Error::InvalidInput(InvalidInput::NonFiniteCoordinate))
        );
    }

    #[test]
    fn rejects_excessive_turning() {
        let bezier = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(-3.0, 3.0),
            Point2::new(0.1, 0.0),
        );
        let err = fit_arcs(&bezier, 0.1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInput::ExcessiveTurning(turning)) if turning > PI
        ));
    }

    #[test]
    fn depth_limit() {
        let config = FitConfig::new().max_depth(0);
        assert_eq!(
            fit_arcs_with(&gentle(), 0.001, &config),
            Err(Error::SubdivisionLimitExceeded {
                span: Span::new(0.0, 1.0),
                max_depth: 0
            })
        );
        // the limit is capped by the stack capacity
        let config = FitConfig::new().max_depth(usize::MAX);
        assert!(fit_arcs_with(&spiral(), 0.001, &config).is_ok());
    }

    #[test]
    fn iteration_cap() {
        let config = FitConfig::new()
            .solver(JunctionSolver::Bisection { tolerance: 0.0 })
            .max_iterations(4);
        let err = fit_arcs_with(&gentle(), 0.1, &config).unwrap_err();
        assert_eq!(
            err,
            Error::ConvergenceFailure {
                cause: RootFindingError::MaxIterationsReached,
                span: Span::new(0.0, 1.0)
            }
        );
    }

    #[test]
    fn arc_count_is_scale_invariant() {
        let reference = fit_arcs(&spiral(), 0.01).unwrap().len();
        assert_eq!(reference, 18);
        for scale in [1e-2, 1e-3, 1e-4] {
            let [p0, p1, p2, p3] = spiral().control_points();
            let scaled = CubicBezier::new(p0 * scale, p1 * scale, p2 * scale, p3 * scale);
            let arcs = fit_arcs(&scaled, 0.01 * scale).unwrap();
            assert_eq!(arcs.len(), reference);
        }
    }

    #[test]
    fn junction_solver_follows_allowable_error() {
        let [p0, p1, p2, p3] = spiral().control_points();
        let scale = 1e-3;
        let scaled = CubicBezier::new(p0 * scale, p1 * scale, p2 * scale, p3 * scale);
        let biarc = Biarc::new(&scaled, Span::new(0.0, 1.0), EPSILON).unwrap();
        let newton = solve_junction(&scaled, &biarc, 0.01 * scale, &FitConfig::default()).unwrap();
        let config = FitConfig::new().solver(JunctionSolver::bisection());
        let bisection = solve_junction(&scaled, &biarc, 0.01 * scale, &config).unwrap();
        assert!((newton - bisection).abs() < 1e-4);
    }

    #[test]
    fn inflected_curve_is_split() {
        let s_curve = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, -1.0),
            Point2::new(3.0, 0.5),
        );
        let arcs = fit_arcs(&s_curve, 0.01).unwrap();
        assert_eq!(arcs.len(), 12);

        // one arc ends exactly where the curvature changes sign
        let inflection = s_curve.eval(6.0 / 13.0);
        assert!(arcs
            .iter()
            .any(|arc| arc.end_point().distance(inflection) < 1e-9));

        for consecutive in arcs.windows(2) {
            assert!(consecutive[0].end_point().distance(consecutive[1].start_point()) < 1e-9);
        }
        let nsteps = 2000;
        for t in 0..=nsteps {
            let p = s_curve.eval(t as f64 / nsteps as f64);
            let nearest = arcs
                .iter()
                .map(|arc| arc.distance_to_point(p))
                .fold(f64::INFINITY, |a, b| a.min(b));
            assert!(nearest <= 0.01);
        }
    }

    #[test]
    fn start_tangent_without_first_control_point() {
        let bezier = CubicBezier::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(5.0, -1.0),
            Point2::new(6.0, 2.0),
        );
        let arcs = fit_arcs(&bezier, 0.01).unwrap();
        let first = arcs.first().unwrap();
        assert!(first.start_point().distance(bezier.start()) < 1e-9);
        // the radius at the start is perpendicular to the direction of the curve
        let radius = first.start_point() - first.center();
        assert!(radius.dot(Point2::new(5.0, -1.0)).abs() < 1e-9 * first.radius());
    }

    #[test]
    fn output_container_is_overwritten() {
        let config = FitConfig::default();
        let mut arcs = fit_arcs(&spiral(), 0.01).unwrap();
        assert!(arcs.len() > 2);

        fit_arcs_into(&gentle(), 0.1, &config, &mut arcs).unwrap();
        assert_eq!(arcs, fit_arcs(&gentle(), 0.1).unwrap());

        assert!(fit_arcs_into(&line(), 0.1, &config, &mut arcs).is_err());
        assert!(arcs.is_empty());
    }
}
