//! # Constants and type definitions for orbslf
//!
//! This module centralizes the **physical constants**, **conversion factors** and **unit type
//! aliases** shared by the orbit transforms, the planetary ephemerides and the SLF writer.
//!
//! ## Overview
//!
//! - Gravitational constant, speed of light and solar mass used by the downstream simulators
//! - Unit conversions (degrees ↔ radians, AU ↔ meters, meters ↔ gigameters)
//! - Core type aliases used across the crate
//!
//! The numerical values are the ones baked into existing SLF files; changing any of them changes
//! the generated state vectors.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in meters
pub const AU: f64 = 149_597_870_691.0;

/// Meters in one gigameter (SLF position unit)
pub const GM: f64 = 1.0e9;

/// Meters per second in one km/s (SLF velocity unit)
pub const KM_PER_S: f64 = 1.0e3;

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6725985e-11;

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Solar mass in kg
pub const SUN_MASS: f64 = 1.98894729428839E+30;

/// Mass unit of the SLF body line (kg)
pub const SLF_MASS_UNIT: f64 = 1.0e24;

/// Radius unit of the SLF body line (m)
pub const SLF_RADIUS_UNIT: f64 = 1.0e6;

/// Julian Day of the J2000.0 epoch
pub const J2000: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Obliquity of the ecliptic in degrees, as a widened `f32`.
pub const OBLIQUITY_OF_THE_ECLIPTIC: f64 = 23.43928_f32 as f64;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Julian Day Number (days)
pub type JulianDay = f64;

/// Convert an angle from degrees to radians.
#[inline]
pub fn degree_to_radian(angle: Degree) -> Radian {
    std::f64::consts::PI * angle / 180.0
}
