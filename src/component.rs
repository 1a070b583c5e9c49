//! The capability contract every pluggable component implements.
//!
//! A component is a self-contained tool panel: it describes itself through a
//! static [`ComponentConfig`] accessor and reacts to the lifecycle hooks the
//! host drives. The host never looks inside a component beyond this trait.

/// Static metadata a component type exposes about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Display name shown in catalogs and logs
    pub name: String,
    /// Component author
    pub author: String,
    /// Component version string
    pub version: String,
    /// Optional one-paragraph description
    pub description: Option<String>,
    /// Optional URL to a readme or help page
    pub readme_url: Option<String>,
}

impl ComponentConfig {
    /// Create a config with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            version: String::new(),
            description: None,
            readme_url: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the readme URL.
    pub fn with_readme_url(mut self, url: impl Into<String>) -> Self {
        self.readme_url = Some(url.into());
        self
    }
}

/// Rectangle a component is asked to render into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create bounds from position and extent.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A width/height pair reported by [`Component::preferred_min_size`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// No size preference.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The component capability contract.
///
/// Hook order and rules, driven by the host:
///
/// - [`on_materialized`](Component::on_materialized) runs exactly once,
///   immediately after construction from a record or descriptor and before
///   any other hook.
/// - [`on_activate`](Component::on_activate) runs each time the instance
///   becomes visible; it may run many times over an instance's life.
/// - [`on_deactivate`](Component::on_deactivate) pairs with `on_activate`
///   and must be safe to call even if `on_activate` never ran. It is also
///   the teardown hook: the host calls it one final time before disposal.
/// - [`render`](Component::render) runs every display cycle while active.
///   Errors are caught and logged at the call site; they never take the
///   host down.
pub trait Component: Send {
    /// Static metadata accessor, read once at registry build.
    fn config() -> ComponentConfig
    where
        Self: Sized;

    /// One-time setup that depends on restored identity.
    fn on_materialized(&mut self) {}

    /// The instance became visible/active.
    fn on_activate(&mut self) {}

    /// The instance became inactive.
    fn on_deactivate(&mut self) {}

    /// Draw into `bounds` for this display cycle.
    fn render(&mut self, bounds: Bounds) -> anyhow::Result<()>;

    /// Pure query for the smallest sensible display size.
    fn preferred_min_size(&self) -> Size {
        Size::ZERO
    }
}
