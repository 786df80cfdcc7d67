pub mod audit;
pub mod state_store;
