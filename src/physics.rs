// src/physics.rs
//! Energy unit conversions for line lists.
//!
//! Constants are the exact SI (CODATA 2018) values. Downstream fits work at the
//! precision floor of these numbers, so they are pinned here rather than taken
//! from a dependency.

/// Planck constant, J s.
pub const PLANCK: f64 = 6.626_070_15e-34;
/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;

const PER_CM_TO_PER_M: f64 = 100.0;
const GHZ_TO_HZ: f64 = 1e9;

/// E/k_B for an energy given in cm⁻¹ (E = h·c·ṽ).
pub fn wavenumber_to_kelvin(per_cm: f64) -> f64 {
    per_cm * PER_CM_TO_PER_M * SPEED_OF_LIGHT * PLANCK / BOLTZMANN
}

/// Inverse of [`wavenumber_to_kelvin`].
pub fn kelvin_to_wavenumber(kelvin: f64) -> f64 {
    kelvin * BOLTZMANN / (SPEED_OF_LIGHT * PLANCK) / PER_CM_TO_PER_M
}

/// h·ν/k_B for a frequency in GHz.
pub fn frequency_to_kelvin(ghz: f64) -> f64 {
    PLANCK * ghz * GHZ_TO_HZ / BOLTZMANN
}

/// Wavenumber (cm⁻¹) of a photon at `ghz`.
pub fn frequency_to_wavenumber(ghz: f64) -> f64 {
    ghz * GHZ_TO_HZ / SPEED_OF_LIGHT / PER_CM_TO_PER_M
}

/// Energies derived from one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derived {
    /// Lower state, K.
    pub elow: f64,
    /// Upper state, K.
    pub eup: f64,
    /// Upper state, cm⁻¹.
    pub eup_cm: f64,
}

/// `elow_cm` in cm⁻¹, `freq_ghz` the rest frequency in GHz.
pub fn derive(elow_cm: f64, freq_ghz: f64) -> Derived {
    let elow = wavenumber_to_kelvin(elow_cm);
    let eup = elow + frequency_to_kelvin(freq_ghz);
    let eup_cm = kelvin_to_wavenumber(eup);
    Derived { elow, eup, eup_cm }
}
