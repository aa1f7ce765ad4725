pub mod account;
pub mod spend;
