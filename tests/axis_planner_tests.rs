use function_chart::core::{DEFAULT_TICK_COUNT, format_tick_label, plan_ticks};
use function_chart::error::ChartError;

#[test]
fn default_x_range_yields_eleven_ticks_with_one_decimal_labels() {
    let ticks = plan_ticks(-5.0, 5.0, DEFAULT_TICK_COUNT).expect("valid ticks");

    assert_eq!(ticks.len(), 11);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "-5.0", "-4.0", "-3.0", "-2.0", "-1.0", "0.0", "1.0", "2.0", "3.0", "4.0", "5.0"
        ]
    );
}

#[test]
fn end_ticks_carry_exact_bounds() {
    let ticks = plan_ticks(0.1, 0.7, 3).expect("valid ticks");
    assert_eq!(ticks.len(), 4);
    assert_eq!(ticks[0].value, 0.1);
    assert_eq!(ticks[3].value, 0.7);
    assert_eq!(ticks[0].position, 0.0);
    assert_eq!(ticks[3].position, 1.0);
}

#[test]
fn default_y_range_labels() {
    let ticks = plan_ticks(-2.0, 2.0, 10).expect("valid ticks");
    assert_eq!(ticks[1].label, "-1.6");
    assert_eq!(ticks[5].label, "0.0");
    assert_eq!(ticks[10].label, "2.0");
}

#[test]
fn negative_zero_is_normalized() {
    assert_eq!(format_tick_label(-0.0), "0.0");
    assert_eq!(format_tick_label(-0.04), "-0.0");
    assert_eq!(format_tick_label(1.26), "1.3");
    assert_eq!(format_tick_label(12.0), "12.0");
}

#[test]
fn exact_ties_round_away_from_zero() {
    assert_eq!(format_tick_label(0.25), "0.3");
    assert_eq!(format_tick_label(1.25), "1.3");
    assert_eq!(format_tick_label(2.25), "2.3");
    assert_eq!(format_tick_label(-0.25), "-0.3");
    assert_eq!(format_tick_label(-0.75), "-0.8");
    assert_eq!(format_tick_label(0.5), "0.5");
    // 1.15 is stored slightly below the tie and keeps rounding down.
    assert_eq!(format_tick_label(1.15), "1.1");

    let ticks = plan_ticks(0.0, 2.5, 10).expect("valid ticks");
    assert_eq!(ticks[1].label, "0.3");
    assert_eq!(ticks[3].label, "0.8");
    assert_eq!(ticks[5].label, "1.3");
    assert_eq!(ticks[9].label, "2.3");
    assert_eq!(ticks[10].label, "2.5");
}

#[test]
fn single_interval_yields_both_bounds() {
    let ticks = plan_ticks(3.0, 4.0, 1).expect("valid ticks");
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![3.0, 4.0]);
}

#[test]
fn zero_count_and_non_finite_ranges_are_rejected() {
    assert!(matches!(
        plan_ticks(0.0, 1.0, 0),
        Err(ChartError::InvalidConfig(_))
    ));
    assert!(matches!(
        plan_ticks(f64::NEG_INFINITY, 1.0, 5),
        Err(ChartError::InvalidConfig(_))
    ));
}
