pub mod dto;
pub mod model;
pub mod routes;
pub mod store;
pub mod validation;

pub use model::{Task, TaskStatus};
pub use store::TaskStore;
