pub mod classify;
pub mod validate;

// Re-export command functions for convenience
pub use classify::classify;
pub use validate::validate;
