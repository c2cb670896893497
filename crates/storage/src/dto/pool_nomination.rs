use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NominatePlayerRequest {
    #[validate(range(min = 1, max = 5, message = "Game number must be between 1 and 5"))]
    pub game_number: i32,

    #[validate(length(min = 1, max = 100, message = "Player name must be 1 to 100 characters"))]
    pub player_name: String,
}
