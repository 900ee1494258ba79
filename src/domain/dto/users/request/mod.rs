pub mod auth_request;
pub mod profile_request;
pub mod signup_request;

pub use auth_request::{AdminLoginRequest, CheckUsernameRequest, LoginRequest, OAuthCallbackQuery, ValidateFieldRequest};
pub use profile_request::{PasswordChangeRequest, ProfileUpdateRequest};
pub use signup_request::SignupRequest;
