pub mod memory_order_repo;
pub mod order_repo;

pub use memory_order_repo::InMemoryOrderRepository;
pub use order_repo::{MongoOrderRepository, OrderStore};
