use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the registered participant numbers.
///
/// Implementations return every registered value exactly once. Order is the
/// storage read order and carries no meaning beyond "same pool, same set".
#[async_trait]
pub trait ParticipantPool: Send + Sync {
    async fn load_participants(&self) -> Result<Vec<i64>>;
}
