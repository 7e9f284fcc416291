//! Expert availability

use serde::{Deserialize, Serialize};

use core_kernel::ExpertId;

/// Expert record as returned by the availability query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertRecord {
    pub id: ExpertId,
    pub name: String,
}

/// An expert the operator can pick for the appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertOption {
    pub id: ExpertId,
    pub display_name: String,
}

impl From<ExpertRecord> for ExpertOption {
    fn from(record: ExpertRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.name,
        }
    }
}
