pub mod render;
pub mod state;
pub mod update;

pub use state::{FormField, FormState};
pub use update::{FormOutcome, handle_key};
