pub mod request;
pub mod response;

pub use request::{CreateOrderRequest, UpdateOrderStatusRequest};
pub use response::OrderResponse;
