pub mod normalize;
pub mod salary;

// Re-export command functions for convenience
pub use normalize::normalize;
pub use salary::salary;
