mod loader;

pub use loader::{LoadError, load_questionnaire};
