use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration payload. Absent strings deserialize as empty so that missing
/// fields surface as field errors instead of a parse failure.
#[derive(Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UserStoreRequest {
    #[serde(default)]
    #[schema(example = "rest@api.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "testpass")]
    pub password: String,
    #[serde(default)]
    #[schema(example = "Test name")]
    pub name: Option<String>,
}

/// Partial profile update. Only supplied fields are written.
#[derive(Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UserUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "New name")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "newpassword")]
    pub password: Option<String>,
}
