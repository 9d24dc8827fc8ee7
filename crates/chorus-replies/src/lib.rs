pub mod scheduler;
pub mod thread;

pub use scheduler::{ReplyOutcome, ReplyPlan, ReplyScheduler, SchedulerConfig};
pub use thread::{resolve_context, thread_root};
