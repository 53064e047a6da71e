pub mod config;
pub mod render;
pub mod session;

pub use config::{OutputFormat, ShellConfig};
pub use render::{NodeRole, Renderer};
pub use session::{Command, Session};
