pub mod federated_profile;

pub use federated_profile::{FederatedProfile, OAuthTokenResponse};
