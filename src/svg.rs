//! SVG path data for visual comparison of a curve and its fitted arcs.
//!
//! Coordinates are written as-is, so the angle convention of [`Arc`] maps
//! counterclockwise arcs to sweep-flag 1.

use alloc::string::String;
use core::fmt::{self, Write};

use super::*;

/// Writes `M x y C x1 y1 x2 y2 x y` for `curve`
pub fn write_curve_path<W: Write>(w: &mut W, curve: &CubicBezier) -> fmt::Result {
    let [start, ctrl1, ctrl2, end] = curve.control_points();
    write!(
        w,
        "M {} {} C {} {} {} {} {} {}",
        start.x, start.y, ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, end.x, end.y
    )
}

/// Writes one `M` to the start of the first arc followed by an `A` command per arc.
/// Nothing is written for an empty slice.
pub fn write_arcs_path<W: Write>(w: &mut W, arcs: &[Arc]) -> fmt::Result {
    let first = match arcs.first() {
        Some(arc) => arc,
        None => return Ok(()),
    };
    let start = first.start_point();
    write!(w, "M {} {}", start.x, start.y)?;
    for arc in arcs {
        let end = arc.end_point();
        write!(
            w,
            " A {} {} 0 {} {} {} {}",
            arc.radius(),
            arc.radius(),
            u8::from(arc.is_large_arc()),
            u8::from(!arc.is_clockwise()),
            end.x,
            end.y
        )?;
    }
    Ok(())
}

pub fn curve_path_data(curve: &CubicBezier) -> String {
    let mut d = String::new();
    // writing into a String cannot fail
    let _ = write_curve_path(&mut d, curve);
    d
}

pub fn arcs_path_data(arcs: &[Arc]) -> String {
    let mut d = String::new();
    let _ = write_arcs_path(&mut d, arcs);
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn curve_commands() {
        let curve = CubicBezier::new(
            Point2::new(0.0, 1.5),
            Point2::new(2.0, 3.0),
            Point2::new(4.0, -1.0),
            Point2::new(5.0, 0.0),
        );
        assert_eq!(curve_path_data(&curve), "M 0 1.5 C 2 3 4 -1 5 0");
    }

    #[test]
    fn arc_commands() {
        let ccw = Arc::new(Point2::new(0.0, 0.0), 2.0, 0.0, FRAC_PI_2);
        let cw = Arc::new(Point2::new(0.0, 4.0), 2.0, -FRAC_PI_2, -PI);
        let d = arcs_path_data(&[ccw, cw]);

        let mut commands = d.split(" A ");
        let mv = commands.next().unwrap();
        assert_eq!(mv, "M 2 0");

        let first: alloc::vec::Vec<f64> = commands
            .next()
            .unwrap()
            .split(' ')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(&first[..5], &[2.0, 2.0, 0.0, 0.0, 1.0]);
        assert!(first[5].abs() < 1e-12 && (first[6] - 2.0).abs() < 1e-12);

        let second: alloc::vec::Vec<f64> = commands
            .next()
            .unwrap()
            .split(' ')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(&second[..5], &[2.0, 2.0, 0.0, 0.0, 0.0]);
        assert!((second[5] + 2.0).abs() < 1e-12 && (second[6] - 4.0).abs() < 1e-12);
        assert!(commands.next().is_none());
    }

    #[test]
    fn no_arcs_no_path() {
        assert!(arcs_path_data(&[]).is_empty());
    }
}
