// Adapters layer: concrete participant pool backends.

pub mod pool;
