pub mod auth_response;
pub mod user_response;

pub use auth_response::{AuthResponse, FieldValidationResponse, UsernameAvailabilityResponse};
pub use user_response::UserResponse;
