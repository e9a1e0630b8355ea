#![no_main]

use libfuzzer_sys::fuzz_target;
use mcaspec::calibration::CalibrationOptions;
use mcaspec::iec::IecReader;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must produce a spectrum or an error, never a panic
    let Ok(spectrum) = IecReader::new().parse(Cursor::new(data)) else {
        return;
    };

    for options in [CalibrationOptions::default(), CalibrationOptions::legacy()] {
        if let Ok(calibrated) = spectrum.calibrate(&options) {
            assert_eq!(calibrated.len(), spectrum.table.len());
        }
    }
});
