pub mod controller;
pub mod state;
pub(crate) mod timers;
