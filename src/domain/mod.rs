/// Domain entities.
pub mod entities;
/// Domain error types.
pub mod errors;
/// Port definitions for external collaborators.
pub mod ports;
/// Snowflake cursor math for time-bounded history queries.
pub mod snowflake;
