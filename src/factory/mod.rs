pub mod category_factory;
pub mod provider;
