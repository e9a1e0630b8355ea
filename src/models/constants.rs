use serde::{Deserialize, Serialize};

/// Physical constants used by the closed-form models.
///
/// Passed explicitly to every model that needs them; there is no global
/// table. The default holds the CODATA values the lab has always used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Electron rest mass in kg
    pub electron_mass_kg: f64,
    /// Speed of light in m/s
    pub speed_of_light_m_s: f64,
    /// keV per joule
    pub kev_per_joule: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CODATA
    }
}

impl PhysicalConstants {
    /// CODATA 2014 electron mass, exact speed of light, 1 J = 6.242e15 keV
    pub const CODATA: Self = Self {
        electron_mass_kg: 9.109_383_56e-31,
        speed_of_light_m_s: 299_792_458.0,
        kev_per_joule: 6.242e15,
    };

    /// Electron rest energy `m c^2` in keV
    pub fn electron_rest_energy_kev(&self) -> f64 {
        self.electron_mass_kg * self.speed_of_light_m_s * self.speed_of_light_m_s * self.kev_per_joule
    }
}
