pub mod abi;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod deployer;
pub mod error;
pub mod params;
pub mod task;
pub mod utils;

pub type Result<T> = std::result::Result<T, error::Error>;
