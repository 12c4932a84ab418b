//! Card request bodies

use serde::Deserialize;
use uuid::Uuid;

use crate::backend::store::cards::CardPatch;
use crate::shared::error::SharedError;
use crate::shared::validation::{rule, Validate, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    /// Owning list
    pub owner: Uuid,
    #[serde(default)]
    pub description: String,
    pub color: String,
}

impl Validate for CreateCardRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("name", &self.name, rule::NAME)
            .length("description", &self.description, rule::DESCRIPTION)
            .length("color", &self.color, rule::COLOR)
            .finish()
    }
}

impl Validate for CardPatch {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .optional_length("name", self.name.as_deref(), rule::NAME)
            .optional_length("description", self.description.as_deref(), rule::DESCRIPTION)
            .optional_length("color", self.color.as_deref(), rule::COLOR)
            .finish()
    }
}
