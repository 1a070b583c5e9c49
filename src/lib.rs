//! Component host for registering and managing pluggable tool components.
//!
//! This is the integration crate a workbench application uses to discover
//! component types, browse and search their metadata, pin live instances,
//! and carry the pinned set across restarts.
//!
//! # Example
//!
//! ```rust,ignore
//! use component_host::{
//!     register_component, Bounds, Component, ComponentConfig, ComponentHost, HostConfig,
//! };
//!
//! #[derive(Default)]
//! struct CodeEditorTool;
//!
//! impl Component for CodeEditorTool {
//!     fn config() -> ComponentConfig {
//!         ComponentConfig::new("CodeEditor Tool")
//!             .with_author("Henry")
//!             .with_version("1.0.1")
//!     }
//!
//!     fn render(&mut self, bounds: Bounds) -> anyhow::Result<()> {
//!         // draw the selector UI
//!         Ok(())
//!     }
//! }
//!
//! register_component!("kit.code_editor", CodeEditorTool);
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Restores whatever was pinned last session.
//!     let mut host = ComponentHost::new(HostConfig::default());
//!
//!     host.pin(&"kit.code_editor".into())?;
//!
//!     // Persists the pinned set for next time.
//!     host.shutdown()?;
//!     Ok(())
//! }
//! ```

mod component;
mod config;
mod descriptor;
mod error;
mod host;
mod instance;
mod record;
mod registry;
mod search;
mod store;

pub use component::*;
pub use config::*;
pub use descriptor::*;
pub use error::*;
pub use host::*;
pub use instance::*;
pub use record::*;
pub use registry::*;
pub use search::*;
pub use store::*;

// Macro support; not public API
#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
