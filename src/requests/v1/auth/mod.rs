use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    #[schema(example = "rest@api.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "testpass")]
    pub password: String,
}
