use crate::units::smoothness::SmoothnessReading;
use crate::units::types::Family;
use std::collections::HashMap;

/// Default number of decimals shown for a canonical value.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Display precision, per family with a global fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPreferences {
    pub decimals: u32,
    pub families: HashMap<Family, u32>,
}

impl Default for UnitPreferences {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            families: HashMap::new(),
        }
    }
}

impl UnitPreferences {
    pub fn decimals_for(&self, family: Family) -> u32 {
        self.families.get(&family).copied().unwrap_or(self.decimals)
    }
}

/// Round for display. Stored values are never rounded.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(15) as i32);
    (value * scale).round() / scale
}

/// Renders canonical values with their unit label.
#[derive(Debug, Clone, Default)]
pub struct UnitFormatter {
    preferences: UnitPreferences,
}

impl UnitFormatter {
    pub fn new(preferences: UnitPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &UnitPreferences {
        &self.preferences
    }

    /// "66.67 kN/m". Smoothness has no canonical unit, so the bare number is
    /// returned for it; use [`UnitFormatter::format_smoothness`] instead.
    pub fn format_canonical(&self, family: Family, value: f64) -> String {
        let decimals = self.preferences.decimals_for(family) as usize;
        match family.canonical_unit() {
            Some(unit) => format!("{:.*} {}", decimals, value, unit),
            None => format!("{:.*}", decimals, value),
        }
    }

    /// "150.00 sec (Bekk) ≈ 3.50 µm PPS"
    pub fn format_smoothness(&self, reading: &SmoothnessReading) -> String {
        let decimals = self.preferences.decimals_for(Family::Smoothness) as usize;
        let mut out = format!(
            "{:.*} {} ({})",
            decimals, reading.value, reading.unit, reading.method
        );
        if let Some(eq) = reading.equivalent() {
            let method = crate::units::smoothness::smoothness_method(eq.unit);
            out.push_str(&format!(" ≈ {:.*} {} {}", decimals, eq.value, eq.unit, method));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::types::SmoothnessUnit;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(round_to(0.654, 0), 1.0);
        assert_eq!(round_to(25.4, 3), 25.4);
    }

    #[test]
    fn test_format_canonical_uses_family_precision() {
        let mut preferences = UnitPreferences::default();
        preferences.families.insert(Family::Tensile, 3);
        let formatter = UnitFormatter::new(preferences);

        assert_eq!(formatter.format_canonical(Family::Tensile, 66.666_666), "66.667 kN/m");
        assert_eq!(formatter.format_canonical(Family::Thickness, 25.4), "25.40 µm");
        assert_eq!(formatter.format_canonical(Family::Smoothness, 150.0), "150.00");
    }

    #[test]
    fn test_format_smoothness_with_equivalent() {
        let formatter = UnitFormatter::default();
        let bekk = SmoothnessReading::new(100.0, SmoothnessUnit::Seconds).unwrap();
        assert_eq!(formatter.format_smoothness(&bekk), "100.00 sec (Bekk) ≈ 4.02 µm PPS");

        let bendtsen = SmoothnessReading::new(250.0, SmoothnessUnit::MillilitersPerMinute).unwrap();
        assert_eq!(formatter.format_smoothness(&bendtsen), "250.00 ml/min (Bendtsen)");
    }
}
