use function_chart::api::ChartBuilder;
use function_chart::config::{ChartConfig, SeriesKind, SeriesSpec};
use function_chart::core::{ClipPolicy, PlotLayout, SignalSnapshot, Viewport};
use function_chart::error::ChartError;
use serde_json::json;

#[test]
fn stub_config_builds_sine_path_ticks_and_legend() {
    let scene = ChartBuilder::new()
        .build_from_value(&ChartConfig::stub_value(), &SignalSnapshot::default())
        .expect("scene builds");

    assert_eq!(scene.series.len(), 1);
    let series = &scene.series[0];
    assert_eq!(series.sample_count, 101);
    assert!(series.path.starts_with("M 50 "));
    assert_eq!(series.path.matches('M').count(), 1);
    assert_eq!(series.path.matches('L').count(), 100);
    assert_eq!(series.kind, SeriesKind::Expression);

    assert_eq!(scene.x_ticks.len(), 11);
    assert_eq!(scene.y_ticks.len(), 11);
    assert_eq!(scene.x_ticks[0].pixel, 50.0);
    assert_eq!(scene.x_ticks[10].pixel, 350.0);
    assert_eq!(scene.y_ticks[0].pixel, 250.0);
    assert_eq!(scene.y_ticks[10].pixel, 50.0);
    assert_eq!(scene.y_ticks[10].label, "2.0");

    assert_eq!(scene.legend.len(), 1);
    assert_eq!(scene.legend[0].name, "Sinus");
    assert_eq!(scene.legend[0].color, "#FF0000");
    assert_eq!(scene.display.title, "Function Chart");
    assert_eq!(scene.display.x_label.as_deref(), Some("X"));
}

#[test]
fn four_step_linear_path_is_exact() {
    let config = ChartConfig::new(vec![SeriesSpec::expression("Line", "#000000", "x / 2.5")])
        .with_steps(4);
    let scene = ChartBuilder::new()
        .build(&config, &SignalSnapshot::default())
        .expect("scene builds");

    assert_eq!(
        scene.series_path(0),
        Some("M 50 250 L 125 200 L 200 150 L 275 100 L 350 50")
    );
}

#[test]
fn signal_series_draws_horizontal_segment() {
    let config = ChartConfig::new(vec![SeriesSpec::signal("Temp", "#00ff00", "sensor.temp")])
        .with_y_range(0.0, 40.0);
    let snapshot = SignalSnapshot::new().with_signal("sensor.temp", 20.0);

    let scene = ChartBuilder::new()
        .build(&config, &snapshot)
        .expect("scene builds");
    assert_eq!(scene.series_path(0), Some("M 50 150 L 350 150"));
    assert_eq!(scene.series[0].sample_count, 2);
}

#[test]
fn missing_signal_and_broken_expression_leave_other_series_intact() {
    let config = ChartConfig::new(vec![
        SeriesSpec::signal("Missing", "#111111", "sensor.absent"),
        SeriesSpec::expression("Broken", "#222222", "x +* 2"),
        SeriesSpec::expression("Fine", "#333333", "x"),
    ]);

    let scene = ChartBuilder::new()
        .build(&config, &SignalSnapshot::default())
        .expect("scene builds");

    assert_eq!(scene.series.len(), 3);
    assert!(scene.series[0].is_empty());
    assert!(scene.series[1].is_empty());
    assert!(!scene.series[2].is_empty());
    assert_eq!(scene.legend.len(), 3, "legend lists every series");
}

#[test]
fn break_segments_policy_splits_overshooting_curves() {
    let config = ChartConfig::new(vec![SeriesSpec::expression("Steep", "#000000", "x^2")]);
    let snapshot = SignalSnapshot::default();

    let unclipped = ChartBuilder::new()
        .build(&config, &snapshot)
        .expect("scene builds");
    let clipped = ChartBuilder::new()
        .with_clip_policy(ClipPolicy::BreakSegments)
        .build(&config, &snapshot)
        .expect("scene builds");

    assert_eq!(unclipped.series[0].path.matches('M').count(), 1);
    assert_eq!(clipped.series[0].path.matches('M').count(), 1);
    assert!(clipped.series[0].runs[0].len() < unclipped.series[0].runs[0].len());

    let config = ChartConfig::new(vec![SeriesSpec::expression("Wave", "#000000", "3 * sin(x)")]);
    let clipped = ChartBuilder::new()
        .with_clip_policy(ClipPolicy::BreakSegments)
        .build(&config, &snapshot)
        .expect("scene builds");
    assert!(clipped.series[0].path.matches('M').count() > 1);
}

#[test]
fn custom_layout_changes_pixel_space() {
    let builder = ChartBuilder::new().with_layout(PlotLayout::new(Viewport::new(800, 600), 20.0));
    let config = ChartConfig::new(vec![SeriesSpec::expression("Id", "#000000", "x")])
        .with_y_range(-5.0, 5.0)
        .with_steps(1);

    let scene = builder
        .build(&config, &SignalSnapshot::default())
        .expect("scene builds");
    assert_eq!(scene.series_path(0), Some("M 20 580 L 780 20"));
    assert_eq!(scene.layout.viewport, Viewport::new(800, 600));
}

#[test]
fn invalid_configs_and_layouts_fail_the_pass() {
    let snapshot = SignalSnapshot::default();
    let err = ChartBuilder::new()
        .build_from_value(&json!({ "functions": [] }), &snapshot)
        .expect_err("empty functions");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let config = ChartConfig::new(vec![SeriesSpec::expression("Id", "#000000", "x")]);
    let err = ChartBuilder::new()
        .with_layout(PlotLayout::new(Viewport::new(90, 90), 45.0))
        .build(&config, &snapshot)
        .expect_err("no plot area");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn scene_serializes_to_json() {
    let scene = ChartBuilder::new()
        .build(&ChartConfig::stub(), &SignalSnapshot::default())
        .expect("scene builds");
    let json = scene.to_json_pretty().expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["series"][0]["name"], json!("Sinus"));
    assert_eq!(value["series"][0]["sampleCount"], json!(101));
    assert!(value["series"][0].get("runs").is_none());
    assert_eq!(value["xTicks"][0]["label"], json!("-5.0"));
    assert_eq!(value["legend"][0]["color"], json!("#FF0000"));
    assert_eq!(value["display"]["gridColor"], json!("#dddddd"));
}

#[test]
fn builder_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChartBuilder>();

    let builder = ChartBuilder::new();
    let config = ChartConfig::stub();
    let paths: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    builder
                        .build(&config, &SignalSnapshot::default())
                        .expect("scene builds")
                        .series[0]
                        .path
                        .clone()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });
    assert!(paths.windows(2).all(|pair| pair[0] == pair[1]));
}
