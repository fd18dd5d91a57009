use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
}

impl User {
    /// Builds a user with a freshly generated id.
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// Body accepted by `POST /api/users`.
///
/// Unknown fields are rejected, so a caller cannot pick the `id`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

impl From<CreateUserRequest> for User {
    fn from(body: CreateUserRequest) -> Self {
        User::new(body.firstname, body.lastname)
    }
}
