pub mod engine;
pub mod raffle;
pub mod validator;

pub use crate::domain::model::{DrawOutcome, DrawRequest, Placement, ValidatedDraw};
pub use crate::domain::ports::ParticipantPool;
pub use crate::utils::error::Result;
