pub mod error;
mod state;
pub mod types;

pub use error::*;
pub use state::{PersistedState, STATE_FILENAME, StateEntry};
pub use types::*;
