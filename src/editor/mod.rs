pub mod controller;
pub mod events;
pub mod modal;
pub mod panel;

pub use controller::*;
pub use events::*;
pub use modal::*;
pub use panel::*;
