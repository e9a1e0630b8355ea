use super::*;

#[test]
fn test_electron_rest_energy() {
    let mc2 = PhysicalConstants::default().electron_rest_energy_kev();
    assert!((mc2 - 511.0).abs() < 0.2, "got {mc2}");
}

#[test]
fn test_compton_energy_limits() {
    let constants = PhysicalConstants::default();

    // No scattering leaves the energy unchanged
    assert_eq!(compton_energy(0.0, 661.7, &constants), 661.7);

    // Backscatter of Cs-137 lands near 184 keV
    let back = compton_energy(std::f64::consts::PI, 661.7, &constants);
    assert!((back - 184.3).abs() < 0.5, "got {back}");
}

#[test]
fn test_compton_energy_uses_supplied_constants() {
    let heavy = PhysicalConstants {
        electron_mass_kg: PhysicalConstants::CODATA.electron_mass_kg * 2.0,
        ..PhysicalConstants::CODATA
    };
    let theta = std::f64::consts::FRAC_PI_2;
    assert!(compton_energy(theta, 661.7, &heavy) > compton_energy(theta, 661.7, &PhysicalConstants::CODATA));
}

#[test]
fn test_gaussian_peak() {
    let peak = GaussianPeak {
        std_dev: 2.0,
        mean: 10.0,
        norm: 100.0,
    };
    let top = 100.0 / (2.0 * (2.0 * std::f64::consts::PI).sqrt());
    assert!((peak.eval(10.0) - top).abs() < 1e-12);
    assert!((peak.eval(8.0) - peak.eval(12.0)).abs() < 1e-12);
    assert!((peak.fwhm() - 4.7096).abs() < 1e-3);
}

#[test]
fn test_gaussian_initial_guess() {
    let window = CalibratedTable::new(vec![10.0, 11.0, 12.0, 13.0, 14.0], vec![1.0, 5.0, 9.0, 4.0, 2.0])
        .unwrap();
    let guess = GaussianPeak::initial_guess(&window).unwrap();

    assert_eq!(
        guess,
        GaussianPeak {
            std_dev: 2.0,
            mean: 12.0,
            norm: 9.0
        }
    );
}

#[test]
fn test_gaussian_initial_guess_needs_two_points() {
    let single = CalibratedTable::new(vec![1.0], vec![1.0]).unwrap();
    assert!(GaussianPeak::initial_guess(&single).is_none());
    assert!(GaussianPeak::initial_guess(&CalibratedTable::default()).is_none());
}

#[test]
fn test_exponential_decay() {
    let decay = ExponentialDecay {
        coeff: 100.0,
        tau: 2.2,
        background: 3.0,
    };
    assert_eq!(decay.eval(0.0), 103.0);
    assert!((decay.eval(2.2) - (100.0 / std::f64::consts::E + 3.0)).abs() < 1e-12);
    assert!((decay.half_life() - 2.2 * std::f64::consts::LN_2).abs() < 1e-12);
}
