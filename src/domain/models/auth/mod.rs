pub mod authenticated_user;
pub mod authentication_request;
pub mod role;

pub use authenticated_user::{AdminUser, AuthRejection, AuthenticatedUser, Subject};
pub use authentication_request::{AuthMode, RequiredRole};
pub use role::Role;
