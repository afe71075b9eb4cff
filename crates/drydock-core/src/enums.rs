//! Closed enumerations for drydock.
//!
//! Both enums serialize to the human-readable labels technicians use
//! (`"HMI Box"`, `"Operational with Limitation"`), which are also the values
//! stored in SQL. Unknown labels are rejected, never stored as free text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Subsystem
// ---------------------------------------------------------------------------

/// Vessel subsystem a component change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Subsystem {
    Ilmor,
    #[serde(rename = "ICU")]
    Icu,
    #[serde(rename = "HMI Box")]
    HmiBox,
    Kitbox,
    Orca,
    Battery,
    #[serde(rename = "PDB")]
    Pdb,
    #[serde(rename = "MPPT")]
    Mppt,
    Camera,
    Radar,
    Compass,
    #[serde(rename = "LTE/Starlink")]
    LteStarlink,
    #[serde(rename = "Harness/Cabling")]
    HarnessCabling,
    Other,
}

impl Subsystem {
    /// Every variant, in catalog order.
    pub const ALL: [Self; 14] = [
        Self::Ilmor,
        Self::Icu,
        Self::HmiBox,
        Self::Kitbox,
        Self::Orca,
        Self::Battery,
        Self::Pdb,
        Self::Mppt,
        Self::Camera,
        Self::Radar,
        Self::Compass,
        Self::LteStarlink,
        Self::HarnessCabling,
        Self::Other,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ilmor => "Ilmor",
            Self::Icu => "ICU",
            Self::HmiBox => "HMI Box",
            Self::Kitbox => "Kitbox",
            Self::Orca => "Orca",
            Self::Battery => "Battery",
            Self::Pdb => "PDB",
            Self::Mppt => "MPPT",
            Self::Camera => "Camera",
            Self::Radar => "Radar",
            Self::Compass => "Compass",
            Self::LteStarlink => "LTE/Starlink",
            Self::HarnessCabling => "Harness/Cabling",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subsystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "subsystem",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// RepairStatus
// ---------------------------------------------------------------------------

/// Final status recorded when a repair is closed out.
///
/// A repair with no status yet is still open; there is no transition graph,
/// any status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RepairStatus {
    Operational,
    #[serde(rename = "Operational with Limitation")]
    OperationalWithLimitation,
    #[serde(rename = "Pending Parts")]
    PendingParts,
    #[serde(rename = "Out of Service")]
    OutOfService,
}

impl RepairStatus {
    pub const ALL: [Self; 4] = [
        Self::Operational,
        Self::OperationalWithLimitation,
        Self::PendingParts,
        Self::OutOfService,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::OperationalWithLimitation => "Operational with Limitation",
            Self::PendingParts => "Pending Parts",
            Self::OutOfService => "Out of Service",
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "repair status",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let val: $ty = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(subsystem_ilmor, Subsystem, Subsystem::Ilmor, "Ilmor");
    test_serde_roundtrip!(subsystem_hmi_box, Subsystem, Subsystem::HmiBox, "HMI Box");
    test_serde_roundtrip!(
        subsystem_lte_starlink,
        Subsystem,
        Subsystem::LteStarlink,
        "LTE/Starlink"
    );
    test_serde_roundtrip!(
        subsystem_harness,
        Subsystem,
        Subsystem::HarnessCabling,
        "Harness/Cabling"
    );
    test_serde_roundtrip!(
        status_limitation,
        RepairStatus,
        RepairStatus::OperationalWithLimitation,
        "Operational with Limitation"
    );
    test_serde_roundtrip!(
        status_out_of_service,
        RepairStatus,
        RepairStatus::OutOfService,
        "Out of Service"
    );

    #[test]
    fn unknown_subsystem_rejected_by_serde() {
        let result: Result<Subsystem, _> = serde_json::from_str("\"Thruster\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_status_rejected_by_from_str() {
        let err = "Scrapped".parse::<RepairStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownVariant { .. }));
    }

    #[test]
    fn from_str_matches_as_str_for_every_variant() {
        for s in Subsystem::ALL {
            assert_eq!(s.as_str().parse::<Subsystem>().unwrap(), s);
        }
        for s in RepairStatus::ALL {
            assert_eq!(s.as_str().parse::<RepairStatus>().unwrap(), s);
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Subsystem::Pdb), "PDB");
        assert_eq!(format!("{}", RepairStatus::PendingParts), "Pending Parts");
    }
}
