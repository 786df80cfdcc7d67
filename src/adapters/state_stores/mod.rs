pub mod file_state_store;
#[cfg(test)]
pub mod memory_state_store;
