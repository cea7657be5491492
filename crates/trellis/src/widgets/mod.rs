//! Built-in widgets: layout containers and leaves.

/// Single-child padding box.
mod container;
/// Row and column containers.
mod multi;
/// Flexible leaf.
mod spacer;
/// Widget hosting a nested viewport.
mod viewport_widget;

pub use container::Container;
pub use multi::MultiContainer;
pub use spacer::Spacer;
pub use viewport_widget::ViewportWidget;
