//! Checklist request bodies

use serde::Deserialize;
use uuid::Uuid;

use crate::backend::store::checklists::ChecklistPatch;
use crate::shared::error::SharedError;
use crate::shared::validation::{rule, Validate, Validator};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistRequest {
    pub objective: String,
    /// Owning card
    pub owner: Uuid,
    #[serde(default)]
    pub is_completed: bool,
}

impl Validate for CreateChecklistRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("objective", &self.objective, rule::OBJECTIVE)
            .finish()
    }
}

impl Validate for ChecklistPatch {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .optional_length("objective", self.objective.as_deref(), rule::OBJECTIVE)
            .finish()
    }
}
