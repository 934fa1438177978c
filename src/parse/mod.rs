pub mod script;

pub use script::{ScriptError, Step, parse_script};
