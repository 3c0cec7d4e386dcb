pub mod orchestrator;
pub mod types;

// Re-export cache types
pub use types::*;
// Re-export the read-through orchestrator
pub use orchestrator::FetchOrchestrator;
