use validator::Validate;

/// Profile fields a user may edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProfileDto {
    #[validate(length(max = 64))]
    pub name: Option<String>,
    #[validate(length(max = 64))]
    pub location: Option<String>,
}
