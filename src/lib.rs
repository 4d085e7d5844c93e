pub mod app_config;
pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod inbox;
pub mod init;
pub mod referral;
pub mod resolve;
pub mod storage;
pub mod util;
pub mod watch;
