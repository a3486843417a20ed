//! Post-approval safety audit model.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuditCategory {
    ProtectiveEquipment,
    AreaAndEquipment,
    HazardIsolation,
    Personnel,
}

macro_rules! audit_checks {
    ($( $variant:ident => ($name:literal, $key:literal, $category:ident) ),+ $(,)?) => {
        /// One item of the safety checklist.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum AuditCheck {
            $( $variant, )+
        }

        impl AuditCheck {
            pub const ALL: &'static [AuditCheck] = &[ $( AuditCheck::$variant, )+ ];

            /// Parameter/column name used by the data service.
            pub fn name(self) -> &'static str {
                match self { $( AuditCheck::$variant => $name, )+ }
            }

            /// Field name used by HTTP clients.
            pub fn key(self) -> &'static str {
                match self { $( AuditCheck::$variant => $key, )+ }
            }

            pub fn category(self) -> AuditCategory {
                match self { $( AuditCheck::$variant => AuditCategory::$category, )+ }
            }
        }
    };
}

audit_checks! {
    Helmet => ("Helmet", "helmet", ProtectiveEquipment),
    EarPlugs => ("EarPlugs", "earPlugs", ProtectiveEquipment),
    Glasses => ("Glasses", "glasses", ProtectiveEquipment),
    Mask => ("Mask", "mask", ProtectiveEquipment),
    ChemicalSuit => ("ChemicalSuit", "chemicalSuit", ProtectiveEquipment),
    Gloves => ("Gloves", "gloves", ProtectiveEquipment),
    SafetyShoes => ("SafetyShoes", "safetyShoes", ProtectiveEquipment),
    Belt => ("Belt", "belt", ProtectiveEquipment),
    SafetyRope => ("SafetyRope", "safetyRope", ProtectiveEquipment),
    ReflectiveVest => ("ReflectiveVest", "reflectiveVest", ProtectiveEquipment),
    AreaBarrier => ("AreaBarrier", "areaBarrier", AreaAndEquipment),
    EquipmentStrength => ("EquipmentStrength", "equipmentStrength", AreaAndEquipment),
    StandardInstallation => ("StandardInstallation", "standardInstallation", AreaAndEquipment),
    ToolReadiness => ("ToolReadiness", "toolReadiness", AreaAndEquipment),
    FireExtinguisher => ("FireExtinguisher", "fireExtinguisher", HazardIsolation),
    ElectricalCutoff => ("ElectricalCutoff", "electricalCutoff", HazardIsolation),
    AlarmSystemOff => ("AlarmSystemOff", "alarmSystemOff", HazardIsolation),
    UndergroundCheck => ("UndergroundCheck", "undergroundCheck", HazardIsolation),
    ChemicalCheck => ("ChemicalCheck", "chemicalCheck", HazardIsolation),
    PressureCheck => ("PressureCheck", "pressureCheck", HazardIsolation),
    Authorizer => ("Authorizer", "authorizer", Personnel),
    Assistant => ("Assistant", "assistant", Personnel),
    Supervisor => ("Supervisor", "supervisor", Personnel),
    Worker => ("Worker", "worker", Personnel),
}

impl AuditCheck {
    fn from_field(field: &str) -> Option<AuditCheck> {
        AuditCheck::ALL
            .iter()
            .copied()
            .find(|c| c.name() == field || c.key() == field)
    }

    fn index(self) -> usize {
        AuditCheck::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }
}

/// The boolean checklist. Items that were never ticked are `false`.
///
/// Deserializes from a map keyed by either the data service's column
/// names or the camelCase HTTP names; other keys are ignored so that the
/// checklist can be flattened into a larger row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditChecklist {
    checks: [bool; 24],
}

impl AuditChecklist {
    pub fn get(&self, check: AuditCheck) -> bool {
        self.checks[check.index()]
    }

    pub fn set(&mut self, check: AuditCheck, value: bool) {
        self.checks[check.index()] = value;
    }

    pub fn with(mut self, check: AuditCheck, value: bool) -> Self {
        self.set(check, value);
        self
    }

    /// All items in checklist order.
    pub fn items(&self) -> impl Iterator<Item = (AuditCheck, bool)> + '_ {
        AuditCheck::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| **c).count()
    }

    pub fn passed_in(&self, category: AuditCategory) -> usize {
        self.items()
            .filter(|(c, v)| *v && c.category() == category)
            .count()
    }
}

impl Serialize for AuditChecklist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AuditCheck::ALL.len()))?;
        for (check, value) in self.items() {
            map.serialize_entry(check.name(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AuditChecklist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChecklistVisitor;

        impl<'de> Visitor<'de> for ChecklistVisitor {
            type Value = AuditChecklist;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of audit checks")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut checklist = AuditChecklist::default();
                while let Some(field) = map.next_key::<String>()? {
                    let value: Value = map.next_value()?;
                    if let Some(check) = AuditCheck::from_field(&field) {
                        checklist.set(check, truthy(&value));
                    }
                }
                Ok(checklist)
            }
        }

        deserializer.deserialize_map(ChecklistVisitor)
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::String(s) => matches!(s.trim(), "1" | "true" | "True"),
        _ => false,
    }
}

/// An audit row as returned by the audits procedure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PermitAudit {
    #[serde(default)]
    pub audit_id: Option<i64>,
    pub permit_id: i64,
    pub audited_by: i64,
    #[serde(default)]
    pub audited_by_name: Option<String>,
    #[serde(default, with = "wire::option_timestamp")]
    pub audit_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(flatten)]
    pub checks: AuditChecklist,
}

/// Input for recording an audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermitAudit {
    pub permit_id: i64,
    pub audited_by: i64,
    pub checks: AuditChecklist,
    pub remarks: Option<String>,
}

/// Picks the audit that should be shown for a permit. Several rows may
/// accumulate; the newest wins, with the highest id breaking ties.
pub fn latest_audit(audits: Vec<PermitAudit>) -> Option<PermitAudit> {
    audits
        .into_iter()
        .max_by_key(|a| (a.audit_date, a.audit_id))
}
