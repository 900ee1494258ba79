pub mod token;

pub use token::{Claims, IssuedToken, SUPER_ADMIN_SUBJECT};
