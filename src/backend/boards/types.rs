//! Board request bodies

use serde::Deserialize;

use crate::backend::store::boards::BoardPatch;
use crate::shared::error::SharedError;
use crate::shared::validation::{rule, Validate, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoardRequest {
    pub name: String,
    pub color: String,
}

impl Validate for CreateBoardRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("name", &self.name, rule::NAME)
            .length("color", &self.color, rule::COLOR)
            .finish()
    }
}

impl Validate for BoardPatch {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .optional_length("name", self.name.as_deref(), rule::NAME)
            .optional_length("color", self.color.as_deref(), rule::COLOR)
            .finish()
    }
}
