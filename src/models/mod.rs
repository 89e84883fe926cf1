pub mod category;
pub mod expense;
pub mod user;
