//! Logging facilities.
//!
//! The toolkit instruments itself with the `tracing` crate. Hosts install
//! their own subscriber; nothing here configures output.
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=cinder_ui::markup=debug`.
pub mod targets {
    /// Widget tree structure and lifecycle.
    pub const TREE: &str = "cinder_ui::tree";
    /// Layout and anchor resolution.
    pub const LAYOUT: &str = "cinder_ui::layout";
    /// Input routing and hotkeys.
    pub const INPUT: &str = "cinder_ui::input";
    /// Animation scheduling.
    pub const ANIMATION: &str = "cinder_ui::animation";
    /// Markup and style-sheet loading.
    pub const MARKUP: &str = "cinder_ui::markup";
    /// Context lifecycle and routing decisions.
    pub const CONTEXT: &str = "cinder_ui::context";
}
