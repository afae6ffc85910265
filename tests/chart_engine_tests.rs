use function_chart::api::{ChartBuilder, ChartEngine};
use function_chart::config::{ChartConfig, DEFAULT_BACKGROUND_COLOR, SeriesSpec, palette_color};
use function_chart::core::{ClipPolicy, SignalSnapshot, Viewport};
use function_chart::error::ChartError;
use function_chart::render::NullRenderer;
use serde_json::json;

fn signal_config() -> ChartConfig {
    ChartConfig::new(vec![
        SeriesSpec::expression("Sin", "#ff0000", "sin(x)"),
        SeriesSpec::signal("Temp", "#0000ff", "sensor.temp"),
    ])
    .with_y_range(-5.0, 30.0)
}

#[test]
fn render_passes_frame_to_renderer() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), signal_config()).expect("engine init");

    let scene = engine.render().expect("render");
    assert!(scene.series[1].is_empty());

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_path_count, 1);
    assert_eq!(renderer.last_line_count, 24);
    assert_eq!(renderer.last_text_count, 22);
    assert_eq!(renderer.last_vertex_count, 101);
    assert_eq!(renderer.last_viewport, Some(Viewport::new(400, 300)));
}

#[test]
fn new_signal_values_show_up_on_next_render() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), signal_config()).expect("engine init");
    engine.render().expect("first render");

    engine.set_signals(SignalSnapshot::new().with_signal("sensor.temp", 21.5));
    let scene = engine.render().expect("second render");

    assert_eq!(scene.series[1].sample_count, 2);
    assert_eq!(engine.renderer().last_path_count, 2);
    assert_eq!(engine.renderer().frames_rendered, 2);
    assert_eq!(engine.snapshot().get("sensor.temp"), Some(21.5));
}

#[test]
fn rejected_config_keeps_previous_one() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), signal_config()).expect("engine init");

    let err = engine
        .set_config_value(&json!({ "functions": [] }))
        .expect_err("empty functions");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
    assert_eq!(engine.config(), &signal_config());

    engine
        .set_config_value(&ChartConfig::stub_value())
        .expect("stub accepted");
    assert_eq!(engine.config().series.len(), 1);
}

#[test]
fn invalid_initial_config_is_rejected() {
    let result = ChartEngine::new(NullRenderer::default(), ChartConfig::new(Vec::new()));
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn engine_uses_supplied_builder() {
    let config = ChartConfig::new(vec![SeriesSpec::expression("Wave", "#000", "3 * sin(x)")]);
    let engine = ChartEngine::new(NullRenderer::default(), config)
        .expect("engine init")
        .with_builder(ChartBuilder::new().with_clip_policy(ClipPolicy::BreakSegments));

    let scene = engine.build_scene().expect("scene builds");
    assert!(scene.series[0].runs.len() > 1);
}

#[test]
fn blank_series_color_falls_back_to_palette() {
    let config = ChartConfig::new(vec![
        SeriesSpec::expression("a", "#ff0000", "x"),
        SeriesSpec::expression("b", " ", "x"),
    ]);
    config.validate().expect("blank color is allowed");

    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let scene = engine.render().expect("render");

    assert_eq!(scene.series[0].color, "#ff0000");
    assert_eq!(scene.series[1].color, palette_color(1));
    assert_eq!(scene.legend[1].color, palette_color(1));
    assert_eq!(engine.renderer().last_path_count, 2);
}

#[test]
fn blank_colors_in_json_use_defaults() {
    let mut engine = ChartEngine::new(NullRenderer::default(), signal_config()).expect("engine init");
    engine
        .set_config_value(&json!({
            "backgroundColor": "   ",
            "gridColor": "",
            "functions": [{ "source": "x", "color": "  " }]
        }))
        .expect("blank colors accepted");

    let scene = engine.render().expect("render");
    assert_eq!(scene.display.background_color, DEFAULT_BACKGROUND_COLOR);
    assert_eq!(scene.series[0].color, palette_color(0));
}

#[test]
fn control_characters_in_colors_are_configuration_errors() {
    let config = ChartConfig::new(vec![SeriesSpec::expression("a", "#ff\u{0}000", "x")]);
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), config),
        Err(ChartError::InvalidConfig(_))
    ));

    let mut engine = ChartEngine::new(NullRenderer::default(), signal_config()).expect("engine init");
    let err = engine
        .set_config_value(&json!({
            "gridColor": "#ddd\u{7}",
            "functions": [{ "source": "x" }]
        }))
        .expect_err("control character in gridColor");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
    assert_eq!(engine.config(), &signal_config());
}
