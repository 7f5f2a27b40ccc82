// Catalogue of measurement families, for listings and reverse token lookup.

use crate::units::types::{
    Family, SmoothnessUnit, StiffnessUnit, TearUnit, TensileUnit, ThicknessUnit,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyInfo {
    pub family: Family,
    pub canonical_unit: Option<&'static str>,
    pub units: Vec<&'static str>,
}

impl FamilyInfo {
    pub fn of(family: Family) -> Self {
        Self {
            family,
            canonical_unit: family.canonical_unit(),
            units: family.unit_tokens(),
        }
    }
}

pub fn families() -> Vec<FamilyInfo> {
    Family::ALL.iter().map(|f| FamilyInfo::of(*f)).collect()
}

/// Families whose vocabulary contains `token`. A token can belong to more
/// than one family ("µm" is both a caliper and a PPS smoothness unit).
pub fn families_for_token(token: &str) -> Vec<Family> {
    Family::ALL
        .iter()
        .copied()
        .filter(|family| accepts(*family, token))
        .collect()
}

fn accepts(family: Family, token: &str) -> bool {
    match family {
        Family::Thickness => token.parse::<ThicknessUnit>().is_ok(),
        Family::Tensile => token.parse::<TensileUnit>().is_ok(),
        Family::Tear => token.parse::<TearUnit>().is_ok(),
        Family::Stiffness => token.parse::<StiffnessUnit>().is_ok(),
        Family::Smoothness => token.parse::<SmoothnessUnit>().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_families_listing() {
        let all = families();
        assert_eq!(all.len(), 5);
        assert_eq!(
            all[1],
            FamilyInfo {
                family: Family::Tensile,
                canonical_unit: Some("kN/m"),
                units: vec!["kN/m", "kgf/15mm", "N/15mm", "lb/in"],
            }
        );
        assert_eq!(all[4].canonical_unit, None);
    }

    #[test]
    fn test_families_for_token() {
        assert_eq!(families_for_token("gf"), vec![Family::Tear]);
        assert_eq!(
            families_for_token("µm"),
            vec![Family::Thickness, Family::Smoothness]
        );
        assert_eq!(families_for_token("gf·cm"), vec![Family::Stiffness]);
        assert!(families_for_token("psi").is_empty());
    }
}
