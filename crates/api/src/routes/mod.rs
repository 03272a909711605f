pub mod setups;
pub mod stream;
