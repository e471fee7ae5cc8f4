pub mod checks;
pub mod document;
pub mod mock;
pub mod models;
pub mod protocols;

pub use document::ScriptFormat;
pub use models::{AngusScript, ScriptError, ScriptErrorKind, ScriptResult};
