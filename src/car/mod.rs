pub mod controller;
pub mod queue;
pub mod scheduler;
pub mod queue_tests;

pub use controller::ElevatorController;
pub use queue::RequestQueue;
pub use scheduler::Scheduler;
pub use scheduler::TimerEvent;
pub use scheduler::TimerHandle;
