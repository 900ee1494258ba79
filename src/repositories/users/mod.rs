pub mod memory_user_repo;
pub mod user_repo;
pub mod user_store;

pub use memory_user_repo::InMemoryUserRepository;
pub use user_repo::MongoUserRepository;
pub use user_store::{ProfileChanges, UserStore};
