/// The producer/consumer copy pipeline.
pub mod pipeline;
/// Stateless services: extraction, candidate building, history streaming.
pub mod services;
/// Command-level use cases.
pub mod use_cases;
