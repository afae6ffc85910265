use function_chart::core::{CoordinateMapper, PlotDomain, PlotLayout, Sample, Viewport, plan_ticks};
use proptest::prelude::*;

proptest! {
    #[test]
    fn mapper_round_trip_property(
        x_min in -1_000_000.0f64..1_000_000.0,
        x_span in 0.001f64..1_000_000.0,
        y_min in -1_000_000.0f64..1_000_000.0,
        y_span in 0.001f64..1_000_000.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0
    ) {
        let domain = PlotDomain::new((x_min, x_min + x_span), (y_min, y_min + y_span));
        let mapper = CoordinateMapper::new(domain, PlotLayout::new(Viewport::new(2048, 1024), 40.0))
            .expect("valid mapper");

        let original = Sample::new(x_min + fx * x_span, y_min + fy * y_span);
        let point = mapper.to_pixel(original);
        prop_assert!(mapper.contains(point) || fx > 0.999_999 || fy > 0.999_999);

        let recovered = mapper.to_domain(point);
        prop_assert!((recovered.x - original.x).abs() <= 1e-6 * x_span.max(1.0));
        prop_assert!((recovered.y - original.y).abs() <= 1e-6 * y_span.max(1.0));
    }

    #[test]
    fn larger_y_renders_higher(
        a in -2.0f64..2.0,
        b in -2.0f64..2.0
    ) {
        let mapper = CoordinateMapper::new(
            PlotDomain::new((-5.0, 5.0), (-2.0, 2.0)),
            PlotLayout::default(),
        )
        .expect("valid mapper");
        let pa = mapper.to_pixel(Sample::new(0.0, a));
        let pb = mapper.to_pixel(Sample::new(0.0, b));
        if a < b {
            prop_assert!(pa.py >= pb.py);
        }
    }

    #[test]
    fn tick_plan_has_exact_ends(
        min in -10_000.0f64..10_000.0,
        span in 0.001f64..10_000.0,
        count in 1u32..100
    ) {
        let max = min + span;
        let ticks = plan_ticks(min, max, count).expect("valid ticks");

        prop_assert_eq!(ticks.len(), count as usize + 1);
        prop_assert_eq!(ticks[0].value, min);
        prop_assert_eq!(ticks[count as usize].value, max);
        for pair in ticks.windows(2) {
            prop_assert!(pair[0].position < pair[1].position);
        }
    }
}
