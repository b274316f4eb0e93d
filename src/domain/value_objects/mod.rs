pub mod deliveries;
pub mod query_context;
pub mod required;
