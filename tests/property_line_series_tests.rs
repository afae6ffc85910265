use function_chart::core::{
    ClipPolicy, CoordinateMapper, PlotDomain, PlotLayout, Sample, path_instructions,
    project_polyline,
};
use proptest::prelude::*;

fn mapper() -> CoordinateMapper {
    CoordinateMapper::new(PlotDomain::new((-5.0, 5.0), (-2.0, 2.0)), PlotLayout::default())
        .expect("valid mapper")
}

proptest! {
    #[test]
    fn unclipped_projection_keeps_every_finite_sample(
        ys in proptest::collection::vec(-1_000.0f64..1_000.0, 1..128)
    ) {
        let samples: Vec<Sample> = ys
            .iter()
            .enumerate()
            .map(|(i, y)| Sample::new(-5.0 + i as f64 * 0.05, *y))
            .collect();
        let runs = project_polyline(&samples, &mapper(), ClipPolicy::Unclipped);

        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(runs[0].len(), samples.len());

        let path = path_instructions(&runs);
        prop_assert_eq!(path.matches('M').count(), 1);
        prop_assert_eq!(path.matches('L').count(), samples.len() - 1);
    }

    #[test]
    fn break_segments_only_emits_points_inside_the_plot(
        ys in proptest::collection::vec(-4.0f64..4.0, 1..128)
    ) {
        let mapper = mapper();
        let samples: Vec<Sample> = ys
            .iter()
            .enumerate()
            .map(|(i, y)| Sample::new(-5.0 + i as f64 * 0.05, *y))
            .collect();
        let runs = project_polyline(&samples, &mapper, ClipPolicy::BreakSegments);

        let inside = samples
            .iter()
            .filter(|sample| mapper.contains(mapper.to_pixel(**sample)))
            .count();
        let emitted: usize = runs.iter().map(Vec::len).sum();
        prop_assert_eq!(emitted, inside);
        prop_assert!(runs.iter().all(|run| !run.is_empty()));
        prop_assert!(runs.iter().flatten().all(|point| mapper.contains(*point)));
    }
}
