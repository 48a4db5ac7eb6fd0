pub mod me;
pub mod store;
pub mod update;
