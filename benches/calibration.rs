use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcaspec::calibration::{CalibrationCurve, CalibrationMarker, CalibrationOptions, OvershootPolicy};
use mcaspec::iec::IecReader;
use std::io::Cursor;

/// Synthetic IEC text with `channels` channels and 12 calibration markers
fn synthetic_iec(channels: usize) -> String {
    let mut text = format!("A004bench\nA004 300.0 301.0 {channels}\nA004date\nA004SPARE\n");
    let step = channels as f64 / 13.0;
    for pair in 0..6 {
        let c0 = step * (2 * pair + 1) as f64;
        let c1 = step * (2 * pair + 2) as f64;
        text.push_str(&format!("A004 {:.3} {:.3} {:.3} {:.3}\n", c0 * 0.7, c0, c1 * 0.7, c1));
    }
    text.push_str("A004 0 0 0 0\nA004USERDEFINED\n");
    for start in (0..channels).step_by(5) {
        text.push_str(&format!("A004 {start}"));
        for offset in 0..5 {
            text.push_str(&format!(" {}", (start + offset) % 977));
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("iec_parse");

    for channels in [1024usize, 4096, 16384] {
        let text = synthetic_iec(channels);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(channels), &text, |b, text| {
            let reader = IecReader::new();
            b.iter(|| reader.parse(Cursor::new(black_box(text.as_bytes()))).unwrap());
        });
    }

    group.finish();
}

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibration_map");
    let markers: Vec<CalibrationMarker> = (1..=24)
        .map(|i| CalibrationMarker::new(i as f64 * 170.5, i as f64 * 120.0))
        .collect();
    let xs: Vec<f64> = (0..16384).map(|i| i as f64).collect();
    group.throughput(Throughput::Elements(xs.len() as u64));

    for overshoot in [OvershootPolicy::Advance, OvershootPolicy::HoldSegment] {
        let options = CalibrationOptions {
            overshoot,
            ..Default::default()
        };
        let curve = CalibrationCurve::build(&markers, &options).unwrap();
        group.bench_function(BenchmarkId::new("piecewise", overshoot), |b| {
            b.iter(|| curve.map(black_box(&xs)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_map);
criterion_main!(benches);
