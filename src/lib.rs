pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::pool::{FilePool, InMemoryPool, PoolFormat};
pub use app::{DrawHandler, DrawReply, DrawResponse};
pub use config::RaffleConfig;
pub use core::raffle::Raffle;
pub use domain::model::{DrawOutcome, DrawRequest, Placement};
pub use utils::error::{DrawError, ErrorKind, Result};
