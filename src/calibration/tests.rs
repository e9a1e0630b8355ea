use super::*;
use proptest::prelude::*;

fn markers(pairs: &[(f64, f64)]) -> Vec<CalibrationMarker> {
    pairs.iter().copied().map(CalibrationMarker::from).collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "index {i}: got {a}, expected {e}");
    }
}

#[test]
fn test_two_markers_scale_by_ratio_of_deltas() {
    let curve = CalibrationCurve::build(
        &markers(&[(10.0, 100.0), (20.0, 150.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    assert_eq!(curve.mode(), CurveMode::Scale { factor: 5.0 });
    assert_eq!(
        curve.map(&[0.0, 10.0, 20.0, 30.0]),
        vec![0.0, 50.0, 100.0, 150.0]
    );
}

#[test]
fn test_two_markers_proportional_scale_is_identity_times_k() {
    let k = 2.5;
    let curve = CalibrationCurve::build(
        &markers(&[(4.0, 4.0 * k), (8.0, 8.0 * k)]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    let xs: Vec<f64> = (0..64).map(f64::from).collect();
    let mapped = curve.map(&xs);
    for (x, y) in xs.iter().zip(&mapped) {
        assert_eq!(*y, k * x);
    }
}

#[test]
fn test_two_markers_ratio_of_values() {
    let options = CalibrationOptions {
        two_point_formula: TwoPointFormula::RatioOfValues,
        ..Default::default()
    };
    let curve =
        CalibrationCurve::build(&markers(&[(20.0, 150.0), (10.0, 100.0)]), &options).unwrap();

    // Lowest-channel marker after sorting: 100 / 10
    assert_eq!(curve.mode(), CurveMode::Scale { factor: 10.0 });
    assert_eq!(curve.map(&[3.0]), vec![30.0]);
}

#[test]
fn test_ratio_of_values_rejects_zero_channel() {
    let options = CalibrationOptions {
        two_point_formula: TwoPointFormula::RatioOfValues,
        ..Default::default()
    };
    let err = CalibrationCurve::build(&markers(&[(0.0, 5.0), (10.0, 100.0)]), &options).unwrap_err();
    assert!(matches!(err, CalibrationError::DegenerateMarkers(_)));
}

#[test]
fn test_single_marker_is_insufficient() {
    let err = CalibrationCurve::build(&markers(&[(5.0, 50.0)]), &CalibrationOptions::default())
        .unwrap_err();
    assert_eq!(
        err,
        CalibrationError::InsufficientMarkers {
            found: 1,
            required: 2
        }
    );
}

#[test]
fn test_no_markers_is_insufficient() {
    let err = CalibrationCurve::build(&[], &CalibrationOptions::default()).unwrap_err();
    assert_eq!(
        err,
        CalibrationError::InsufficientMarkers {
            found: 0,
            required: 2
        }
    );
}

#[test]
fn test_sentinel_truncates_marker_list() {
    let curve = CalibrationCurve::build(
        &markers(&[
            (10.0, 100.0),
            (20.0, 200.0),
            (30.0, 300.0),
            (0.0, 0.0),
            (40.0, 999.0),
        ]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    assert_eq!(
        curve.breakpoints(),
        markers(&[(10.0, 100.0), (20.0, 200.0), (30.0, 300.0)]).as_slice()
    );
}

#[test]
fn test_leading_sentinel_leaves_nothing() {
    let err = CalibrationCurve::build(
        &markers(&[(0.0, 0.0), (10.0, 100.0), (20.0, 200.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::InsufficientMarkers { found: 0, .. }
    ));
}

#[test]
fn test_marker_count_is_bounded() {
    let supplied: Vec<CalibrationMarker> = (1..=30)
        .map(|i| CalibrationMarker::new(f64::from(i) * 10.0, f64::from(i) * 7.0))
        .collect();

    let curve = CalibrationCurve::build(&supplied, &CalibrationOptions::default()).unwrap();
    assert_eq!(curve.breakpoints().len(), MarkerSet::DEFAULT_LIMIT);
    assert_eq!(curve.breakpoints().last().unwrap().channel, 240.0);

    let options = CalibrationOptions {
        max_markers: 3,
        ..Default::default()
    };
    let curve = CalibrationCurve::build(&supplied, &options).unwrap();
    assert_eq!(curve.breakpoints().len(), 3);
}

#[test]
fn test_duplicate_channels_keep_last_seen_value() {
    let curve = CalibrationCurve::build(
        &markers(&[(10.0, 100.0), (20.0, 200.0), (10.0, 110.0), (30.0, 300.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    assert_eq!(
        curve.breakpoints(),
        markers(&[(10.0, 110.0), (20.0, 200.0), (30.0, 300.0)]).as_slice()
    );
}

#[test]
fn test_duplicates_can_collapse_to_single_breakpoint() {
    let err = CalibrationCurve::build(
        &markers(&[(10.0, 100.0), (10.0, 120.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::InsufficientMarkers { found: 1, .. }
    ));
}

#[test]
fn test_piecewise_interpolation_and_extrapolation() {
    let curve = CalibrationCurve::build(
        &markers(&[(20.0, 300.0), (10.0, 100.0), (30.0, 400.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();
    assert_eq!(curve.mode(), CurveMode::Piecewise);

    let xs = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0];
    assert_close(
        &curve.map(&xs),
        &[0.0, 50.0, 100.0, 200.0, 300.0, 350.0, 400.0, 450.0, 500.0],
    );
}

#[test]
fn test_policies_agree_when_breakpoints_are_hit_exactly() {
    let supplied = markers(&[(10.0, 100.0), (20.0, 300.0), (30.0, 400.0)]);
    let advance = CalibrationCurve::build(&supplied, &CalibrationOptions::default()).unwrap();
    let hold = CalibrationCurve::build(&supplied, &CalibrationOptions::legacy()).unwrap();

    let xs: Vec<f64> = (0..=40).map(f64::from).collect();
    assert_close(&advance.map(&xs), &hold.map(&xs));
}

#[test]
fn test_overshoot_advance_moves_to_containing_segment() {
    let curve = CalibrationCurve::build(
        &markers(&[(10.5, 105.0), (20.5, 305.0), (30.5, 405.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    assert_close(
        &curve.map(&[10.0, 11.0, 20.0, 21.0, 31.0]),
        &[100.0, 115.0, 295.0, 310.0, 410.0],
    );
}

#[test]
fn test_overshoot_hold_segment_keeps_current_slope() {
    let curve = CalibrationCurve::build(
        &markers(&[(10.5, 105.0), (20.5, 305.0), (30.5, 405.0)]),
        &CalibrationOptions::legacy(),
    )
    .unwrap();
    assert_eq!(curve.overshoot(), OvershootPolicy::HoldSegment);

    // Integer channels never equal a fractional breakpoint, so the origin
    // segment is used throughout.
    assert_close(
        &curve.map(&[10.0, 11.0, 20.0, 21.0, 31.0]),
        &[100.0, 110.0, 200.0, 210.0, 310.0],
    );
}

#[test]
fn test_breakpoint_at_channel_zero_uses_first_segment_slope() {
    let curve = CalibrationCurve::build(
        &markers(&[(0.0, 5.0), (10.0, 105.0), (20.0, 205.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();

    assert_close(&curve.map(&[0.0, 5.0, 10.0, 15.0]), &[5.0, 55.0, 105.0, 155.0]);
}

#[test]
fn test_map_is_pure() {
    let curve = CalibrationCurve::build(
        &markers(&[(10.5, 105.0), (20.5, 305.0), (30.5, 405.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap();
    let snapshot = curve.clone();

    let xs: Vec<f64> = (0..50).map(f64::from).collect();
    let first = curve.map(&xs);
    let second = curve.map(&xs);

    assert_eq!(first, second);
    assert_eq!(curve, snapshot);
}

#[test]
fn test_least_squares_line() {
    let options = CalibrationOptions {
        strategy: CalibrationStrategy::LeastSquares,
        ..Default::default()
    };
    let curve =
        CalibrationCurve::build(&markers(&[(1.0, 12.0), (2.0, 14.0), (3.0, 16.0)]), &options)
            .unwrap();

    assert_eq!(
        curve.mode(),
        CurveMode::Linear {
            slope: 2.0,
            intercept: 10.0
        }
    );
    assert_close(&curve.map(&[0.0, 10.0]), &[10.0, 30.0]);
}

#[test]
fn test_invalid_markers_are_rejected() {
    let err = CalibrationCurve::build(
        &markers(&[(10.0, f64::NAN), (20.0, 200.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CalibrationError::InvalidMarker { .. }));

    let err = CalibrationCurve::build(
        &markers(&[(-10.0, 5.0), (20.0, 200.0)]),
        &CalibrationOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CalibrationError::InvalidMarker {
            reason: "negative channel",
            ..
        }
    ));
}

#[test]
fn test_marker_set_push_outcomes() {
    let mut set = MarkerSet::new(2);
    assert_eq!(set.push(CalibrationMarker::new(1.0, 10.0)), MarkerPush::Accepted);
    assert_eq!(set.push(CalibrationMarker::new(2.0, 20.0)), MarkerPush::Accepted);
    assert_eq!(set.push(CalibrationMarker::new(3.0, 30.0)), MarkerPush::Full);
    assert!(set.is_closed());
    assert_eq!(set.push(CalibrationMarker::new(4.0, 40.0)), MarkerPush::Closed);
    assert_eq!(set.len(), 2);

    let mut set = MarkerSet::default();
    assert_eq!(set.push(CalibrationMarker::new(0.0, 0.0)), MarkerPush::Terminated);
    assert!(set.is_empty());
    assert!(set.is_closed());
}

#[test]
fn test_periodic_markers() {
    let periodic = MarkerSet::periodic(&[55.0, 114.5, 174.0], 0.5);
    assert_eq!(
        periodic,
        markers(&[(55.0, 0.5), (114.5, 1.0), (174.0, 1.5)])
    );
}

fn increasing_markers() -> impl Strategy<Value = Vec<CalibrationMarker>> {
    prop::collection::vec((0.5f64..50.0, 0.1f64..100.0), 2..12).prop_map(|steps| {
        let mut channel = 0.0;
        let mut value = 0.0;
        steps
            .into_iter()
            .map(|(dc, dv)| {
                channel += dc;
                value += dv;
                CalibrationMarker::new(channel, value)
            })
            .collect()
    })
}

fn ascending_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1000.0, 1..200).prop_map(|mut xs| {
        xs.sort_by(f64::total_cmp);
        xs
    })
}

proptest! {
    /// Ascending input always maps to non-decreasing output
    #[test]
    fn prop_map_is_monotone(
        supplied in increasing_markers(),
        xs in ascending_values(),
        hold in any::<bool>(),
    ) {
        let options = if hold { CalibrationOptions::legacy() } else { CalibrationOptions::default() };
        let curve = CalibrationCurve::build(&supplied, &options).unwrap();
        let ys = curve.map(&xs);

        prop_assert_eq!(ys.len(), xs.len());
        for pair in ys.windows(2) {
            prop_assert!(pair[1] >= pair[0] - 1e-9 * pair[0].abs().max(1.0));
        }
    }

    /// The advancing cursor reproduces every breakpoint exactly
    #[test]
    fn prop_piecewise_passes_through_breakpoints(supplied in increasing_markers()) {
        prop_assume!(supplied.len() >= 3);
        let curve = CalibrationCurve::build(&supplied, &CalibrationOptions::default()).unwrap();
        let channels: Vec<f64> = curve.breakpoints().iter().map(|b| b.channel).collect();
        let ys = curve.map(&channels);

        for (y, b) in ys.iter().zip(curve.breakpoints()) {
            prop_assert!((y - b.value).abs() < 1e-9 * b.value.abs().max(1.0));
        }
    }
}
