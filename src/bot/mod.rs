pub mod orchestrator;
pub mod scheduler;
pub mod tracker;
pub mod tweets;

pub use orchestrator::Orchestrator;
pub use scheduler::Scheduler;
