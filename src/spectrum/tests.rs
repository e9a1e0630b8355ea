use super::*;
use crate::calibration::{CalibrationCurve, CalibrationMarker, CalibrationOptions};

fn table(x: &[f64], counts: &[f64]) -> CalibratedTable {
    CalibratedTable::new(x.to_vec(), counts.to_vec()).unwrap()
}

#[test]
fn test_calibrate_leaves_raw_table_untouched() {
    let raw = ChannelTable::from_counts(vec![3.0, 1.0, 4.0, 1.0, 5.0]);
    let curve = CalibrationCurve::build(
        &[
            CalibrationMarker::new(1.0, 2.0),
            CalibrationMarker::new(2.0, 4.0),
        ],
        &CalibrationOptions::default(),
    )
    .unwrap();

    let calibrated = raw.calibrate(&curve);

    assert_eq!(raw.counts(), &[3.0, 1.0, 4.0, 1.0, 5.0]);
    assert_eq!(raw.x_values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(calibrated.len(), raw.len());
    assert_eq!(calibrated.x(), &[0.0, 2.0, 4.0, 6.0, 8.0]);
    assert_eq!(calibrated.counts(), raw.counts());
}

#[test]
fn test_channel_table_records() {
    let mut raw = ChannelTable::zeroed(3);
    assert!(raw.set_count(1, 7.0));
    assert!(!raw.set_count(3, 9.0));

    let records: Vec<ChannelRecord> = raw.records().collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1], ChannelRecord { channel: 1, count: 7.0 });
    assert_eq!(raw.count(3), None);
    assert_eq!(raw.total_counts(), 7.0);
}

#[test]
fn test_uncalibrated_uses_channel_numbers() {
    let raw = ChannelTable::from_counts(vec![1.0, 2.0]);
    let table = raw.uncalibrated();
    assert_eq!(table.points().collect::<Vec<_>>(), vec![(0.0, 1.0), (1.0, 2.0)]);
}

#[test]
fn test_new_rejects_length_mismatch() {
    let err = CalibratedTable::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
    assert_eq!(
        err,
        SpectrumError::LengthMismatch {
            x_len: 2,
            counts_len: 1
        }
    );
}

#[test]
fn test_window_is_inclusive() {
    let t = table(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 30.0, 40.0, 50.0]);

    let w = t.window(Some(2.0), Some(4.0)).unwrap();
    assert_eq!(w.x(), &[2.0, 3.0, 4.0]);
    assert_eq!(w.counts(), &[20.0, 30.0, 40.0]);

    let open_upper = t.window(Some(4.0), None).unwrap();
    assert_eq!(open_upper.x(), &[4.0, 5.0]);

    let open_lower = t.window(None, Some(1.5)).unwrap();
    assert_eq!(open_lower.x(), &[1.0]);
}

#[test]
fn test_window_rejects_inverted_bounds() {
    let t = table(&[1.0, 2.0], &[1.0, 1.0]);
    assert!(matches!(
        t.window(Some(3.0), Some(3.0)),
        Err(SpectrumError::InvalidWindow { .. })
    ));
    assert!(matches!(
        t.window(Some(4.0), Some(1.0)),
        Err(SpectrumError::InvalidWindow { .. })
    ));
}

#[test]
fn test_interpolate() {
    let t = table(&[0.0, 10.0, 20.0], &[0.0, 100.0, 50.0]);

    assert_eq!(t.interpolate(10.0), Some(100.0));
    assert_eq!(t.interpolate(5.0), Some(50.0));
    assert_eq!(t.interpolate(15.0), Some(75.0));
    // Edges extrapolate along the nearest pair
    assert_eq!(t.interpolate(-5.0), Some(-50.0));
    assert_eq!(t.interpolate(30.0), Some(0.0));

    assert_eq!(CalibratedTable::default().interpolate(1.0), None);
    assert_eq!(table(&[1.0], &[4.0]).interpolate(9.0), Some(4.0));
}

#[test]
fn test_subtract_background_clamps_at_zero() {
    let signal = table(&[0.0, 1.0, 2.0, 3.0], &[5.0, 8.0, 2.0, 10.0]);
    let noise = table(&[0.0, 2.0], &[2.0, 4.0]);

    let cleaned = signal.subtract_background(&noise);

    assert_eq!(cleaned.x(), signal.x());
    assert_eq!(cleaned.counts(), &[3.0, 5.0, 0.0, 5.0]);
}

#[test]
fn test_subtract_empty_background_is_identity() {
    let signal = table(&[0.0, 1.0], &[5.0, 8.0]);
    assert_eq!(signal.subtract_background(&CalibratedTable::default()), signal);
}

#[test]
fn test_peak_keeps_first_on_ties() {
    let t = table(&[1.0, 2.0, 3.0], &[4.0, 9.0, 9.0]);
    assert_eq!(t.peak(), Some((2.0, 9.0)));
    assert_eq!(CalibratedTable::default().peak(), None);
}

#[test]
fn test_moments_of_symmetric_peak() {
    let t = table(&[1.0, 2.0, 3.0], &[1.0, 2.0, 1.0]);
    let m = t.moments().unwrap();

    assert_eq!(m.total, 4.0);
    assert!((m.mean - 2.0).abs() < 1e-12);
    assert!((m.std_dev - 0.5_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_moments_without_counts() {
    let t = table(&[1.0, 2.0], &[0.0, 0.0]);
    assert!(t.moments().is_none());
}
