use serde::Serialize;
use utoipa::ToSchema;

use crate::models::draft::VisaStatus;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisaStatusOption {
    pub value: VisaStatus,
    pub label: String,
}

impl From<VisaStatus> for VisaStatusOption {
    fn from(status: VisaStatus) -> Self {
        Self {
            value: status,
            label: status.label().to_string(),
        }
    }
}

pub fn visa_status_options() -> Vec<VisaStatusOption> {
    VisaStatus::ALL.into_iter().map(VisaStatusOption::from).collect()
}
