#![allow(non_upper_case_globals)]

//! Convenience functions and constructs to handle conversion between SI and
//! the harmonic-oscillator units used by the evolution routines.
//!
//! Concrete physical constants are taken from NIST.

use std::f64::consts::{ PI, TAU };

/// Planck constant (kg m^2 s^-1)
pub const h: f64 = 6.62607015e-34;
//             +/- 0 (exact)

/// reduced Planck constant (kg m^2 s^-1)
pub const hbar: f64 = h / 2.0 / PI;
//                +/- 0 (exact)

/// Boltzmann's constant (J K^-1)
pub const kB: f64 = 1.380649e-23;
//              +/- 0 (exact)

/// unified atomic mass unit (kg)
pub const amu: f64 = 1.66053906660e-27;
//               +/- 0.00000000050e-27

/// Bohr radius (m)
pub const a0: f64 = 5.29177210903e-11;
//              +/- 0.00000000080e-11

/// Bohr magneton (J T^-1)
pub const uB: f64 = 9.2740100783e-24;
//              +/- 0.0000000028e-24

/// Natural units for a particle of a given mass in a harmonic trap.
///
/// With *ω* the trap (angular) frequency, lengths are measured in units of the
/// oscillator length √(*ħ*/*mω*), energies in units of *ħω* and times in
/// units of 1/*ω*. In these units the Gross-Pitaevskii equation takes the form
/// ```text
///   ∂ψ     1
/// i -- = - - ∇²ψ + V ψ + g |ψ|² ψ
///   ∂t     2
/// ```
/// with ψ normalized to the atom number.
///
/// See [`docs/units`][crate::docs#units] for more information.
#[derive(Copy, Clone, Debug)]
pub struct Units {
    /// Particle mass (kg).
    pub m: f64,
    /// Trap angular frequency (s^-1).
    pub omega: f64,
    /// Oscillator length (m).
    pub a: f64,
    /// Energy scale (J).
    pub e: f64,
    /// Time scale (s).
    pub t: f64,
}

impl Units {
    /// Construct from a particle mass (kg) and a trap angular frequency
    /// (s^-1).
    pub fn harmonic(mass: f64, omega: f64) -> Self {
        let a = (hbar / mass / omega).sqrt();
        Self { m: mass, omega, a, e: hbar * omega, t: omega.recip() }
    }

    /// Construct from a mass in atomic mass units and a trap frequency in
    /// hertz.
    pub fn harmonic_amu_hz(mass: f64, freq: f64) -> Self {
        Self::harmonic(mass * amu, TAU * freq)
    }

    // oscillator length for a different trap frequency
    fn length_at(&self, omega: f64) -> f64 {
        (hbar / self.m / omega).sqrt()
    }

    /// Dimensionless interaction strength for `n` atoms with s-wave scattering
    /// length `a_s` (m) in three dimensions, 4π *N a<sub>s</sub>* / *a*.
    pub fn g3d(&self, a_s: f64, n: f64) -> f64 {
        2.0 * TAU * n * a_s / self.a
    }

    /// Dimensionless interaction strength in two dimensions for `n` atoms
    /// tightly confined along *z* by a trap of angular frequency `omega_z`,
    /// √(8π) *N a<sub>s</sub>* / *a<sub>z</sub>*.
    pub fn g2d(&self, a_s: f64, n: f64, omega_z: f64) -> f64 {
        (4.0 * TAU).sqrt() * n * a_s / self.length_at(omega_z)
    }

    /// Dimensionless interaction strength in one dimension for `n` atoms
    /// tightly confined transversely by a trap of angular frequency
    /// `omega_perp`, 2 *N a<sub>s</sub> a* / *a*<sub>⊥</sub>².
    pub fn g1d(&self, a_s: f64, n: f64, omega_perp: f64) -> f64 {
        2.0 * n * a_s * self.a / self.length_at(omega_perp).powi(2)
    }

    /// Convert a length in meters to natural units.
    pub fn to_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a.recip()
    }

    /// Convert a length in natural units to meters.
    pub fn from_nat_length<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.a
    }

    /// Convert an energy in joules to natural units.
    pub fn to_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e.recip()
    }

    /// Convert an energy in natural units to joules.
    pub fn from_nat_energy<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.e
    }

    /// Convert a time in seconds to natural units.
    pub fn to_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t.recip()
    }

    /// Convert a time in natural units to seconds.
    pub fn from_nat_time<T, U>(&self, x: T) -> U
    where T: std::ops::Mul<f64, Output = U>
    {
        x * self.t
    }
}
