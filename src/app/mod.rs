pub mod handler;
pub mod wire;

pub use handler::DrawHandler;
pub use wire::{DrawReply, DrawResponse};
