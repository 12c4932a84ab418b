//! List request bodies

use serde::Deserialize;
use uuid::Uuid;

use crate::backend::store::lists::ListPatch;
use crate::shared::error::SharedError;
use crate::shared::validation::{rule, Validate, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    /// Owning board
    pub owner: Uuid,
}

impl Validate for CreateListRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("name", &self.name, rule::NAME)
            .finish()
    }
}

impl Validate for ListPatch {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .optional_length("name", self.name.as_deref(), rule::NAME)
            .finish()
    }
}
