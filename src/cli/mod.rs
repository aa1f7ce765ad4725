pub mod accounts_cmd;
pub mod config_cmd;
pub mod run_cmd;
pub mod spend_cmd;
