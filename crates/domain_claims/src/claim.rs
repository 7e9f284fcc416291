//! Claim draft and submission payload

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ContractId, ExpertId};
use crate::error::WizardError;

/// Kind of incident being declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    #[serde(rename = "Water Damage")]
    WaterDamage,
    #[serde(rename = "Fire")]
    Fire,
    #[serde(rename = "Theft")]
    Theft,
    #[serde(rename = "Glass Breakage")]
    GlassBreakage,
    #[serde(rename = "Natural Disaster")]
    NaturalDisaster,
}

impl IncidentType {
    /// All incident types in display order
    pub const ALL: [IncidentType; 5] = [
        IncidentType::WaterDamage,
        IncidentType::Fire,
        IncidentType::Theft,
        IncidentType::GlassBreakage,
        IncidentType::NaturalDisaster,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncidentType::WaterDamage => "Water Damage",
            IncidentType::Fire => "Fire",
            IncidentType::Theft => "Theft",
            IncidentType::GlassBreakage => "Glass Breakage",
            IncidentType::NaturalDisaster => "Natural Disaster",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IncidentType {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        IncidentType::ALL
            .into_iter()
            .find(|candidate| normalize_label(candidate.label()) == wanted)
            .ok_or_else(|| WizardError::invalid_field("incident type", s))
    }
}

/// Handling priority of a claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities in display order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Priority::ALL
            .into_iter()
            .find(|candidate| normalize_label(candidate.label()) == wanted)
            .ok_or_else(|| WizardError::invalid_field("priority", s))
    }
}

// "Water Damage", "water_damage" and "water-damage" all compare equal
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Incident details being entered for a new claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDraft {
    /// Date the incident happened
    pub incident_date: Option<NaiveDate>,
    /// Kind of incident
    pub incident_type: Option<IncidentType>,
    /// Handling priority
    pub priority: Priority,
    /// Free-text description
    pub description: String,
    /// Contract the claim is filed against, set at submission
    pub contract_id: Option<ContractId>,
    /// Expert assigned to the claim, set at submission
    pub assigned_expert_id: Option<ExpertId>,
}

/// A single operator edit to the claim draft
///
/// The contract and expert references are deliberately absent: they are
/// only ever filled in when the submission is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimField {
    IncidentDate(Option<NaiveDate>),
    IncidentType(Option<IncidentType>),
    Priority(Priority),
    Description(String),
}

impl ClaimDraft {
    /// Creates an empty draft with the default priority
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an operator edit
    pub fn apply(&mut self, field: ClaimField) {
        match field {
            ClaimField::IncidentDate(date) => self.incident_date = date,
            ClaimField::IncidentType(incident_type) => self.incident_type = incident_type,
            ClaimField::Priority(priority) => self.priority = priority,
            ClaimField::Description(description) => self.description = description,
        }
    }

    /// Whether the incident step has everything it needs
    pub fn is_incident_complete(&self) -> bool {
        self.incident_type.is_some() && !self.description.is_empty()
    }

    /// Returns a copy bound to the given contract and expert
    pub fn bind(&self, contract_id: ContractId, expert_id: Option<ExpertId>) -> Self {
        Self {
            contract_id: Some(contract_id),
            assigned_expert_id: expert_id,
            ..self.clone()
        }
    }
}

/// Payload sent to the remote system to create a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub new_claim: ClaimDraft,
    pub expert_id: Option<ExpertId>,
    pub appointment_date: Option<NaiveDate>,
    pub location_address: String,
}
