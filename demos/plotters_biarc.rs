extern crate plotters;
use plotters::prelude::*;

extern crate biarc;
use biarc::{fit_arcs, CubicBezier, Point2};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // control points for the cubic bezier curve
    let cpoints = vec![
        (0f64, 0f64),
        (0f64, 50f64),
        (100f64, 100f64),
        (150f64, 100f64),
    ];

    let bezier = CubicBezier::new(
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 50.0),
        Point2::new(100.0, 100.0),
        Point2::new(150.0, 100.0),
    );

    let allowable_error = 0.5;
    let arcs = fit_arcs(&bezier, allowable_error)?;
    println!("{} arcs within {}", arcs.len(), allowable_error);
    println!("{}", biarc::svg::arcs_path_data(&arcs));

    // render the curve to desired accuracy
    let nsteps: usize = 1000;
    let mut bezier_graph: Vec<(f64, f64)> = Vec::with_capacity(nsteps);
    for t in 0..=nsteps {
        let t = t as f64 * 1f64 / (nsteps as f64);
        bezier_graph.push(bezier.eval(t).into());
    }

    let root = BitMapBackend::new("biarc_fit.png", (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Biarc Approximation", ("sans-serif", 21).into_font())
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-20f64..170f64, -10f64..120f64)?;

    chart.configure_mesh().draw()?;

    // draw the control points of B(t)
    chart
        .draw_series(PointSeries::of_element(
            cpoints.clone(),
            5,
            &BLUE,
            &|coord, size, style| {
                EmptyElement::at(coord)
                    + Circle::new((0, 0), size, style)
                    + Text::new(
                        format!("{:?}", coord),
                        (0, 15),
                        ("sans-serif", 15).into_font(),
                    )
            },
        ))?
        .label("Control Points of B(t)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(bezier_graph, &RED))?
        .label("B(t)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    // sample every arc from its start to its end angle
    let arc_steps = 64;
    let mut junctions: Vec<(f64, f64)> = Vec::with_capacity(arcs.len() + 1);
    for (i, arc) in arcs.iter().enumerate() {
        let samples: Vec<(f64, f64)> = (0..=arc_steps)
            .map(|k| {
                let angle = arc.start_angle() + arc.sweep_angle() * k as f64 / arc_steps as f64;
                arc.point_at_angle(angle).into()
            })
            .collect();
        let series = chart.draw_series(LineSeries::new(samples, &GREEN))?;
        if i == 0 {
            series
                .label("fitted arcs")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
        }
        junctions.push(arc.start_point().into());
    }
    if let Some(last) = arcs.last() {
        junctions.push(last.end_point().into());
    }

    // arc endpoints, the junctions between consecutive arcs
    chart.draw_series(
        junctions
            .iter()
            .map(|coord| Circle::new(*coord, 3, BLACK.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
