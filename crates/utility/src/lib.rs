pub mod env;
pub mod id;
pub mod let_also;
