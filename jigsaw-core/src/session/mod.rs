pub mod completion;
pub mod drag;
pub mod state;
