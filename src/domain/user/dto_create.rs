use validator::Validate;

use crate::domain::Role;

#[derive(Debug, Clone, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 64), email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Explicit role; when absent the factory picks one.
    pub role: Option<Role>,
    #[validate(length(max = 64))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub location: Option<String>,
}

impl CreateUserDto {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
            role: None,
            name: None,
            location: None,
        }
    }
}
