pub mod config;
pub mod error;
pub mod model;

pub use config::NotesConfig;
pub use error::*;
pub use model::*;
