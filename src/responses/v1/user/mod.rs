use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

/// Public view of a user. The password hash has no field here and so can
/// never be serialized.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq)]
#[response(status = 200, description = "OK")]
pub struct User {
    #[schema(example = "Test name")]
    pub name: String,
    #[schema(example = "rest@api.com")]
    pub email: String,
}
