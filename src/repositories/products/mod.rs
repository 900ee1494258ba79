pub mod memory_product_repo;
pub mod product_repo;

pub use memory_product_repo::InMemoryProductRepository;
pub use product_repo::{MongoProductRepository, ProductStore};
