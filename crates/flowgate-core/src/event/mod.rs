//! Event distribution from the trigger to engine-side consumers.

pub mod bus;

pub use bus::EventBus;
