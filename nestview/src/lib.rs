//! Viewing and manual re-allocation of autoclave nesting layouts.
//!
//! Layouts are computed elsewhere (by the nesting backend); this crate maps them onto a canvas,
//! answers pointer queries against them and validates manual two-autoclave splits.

/// Containers, placed items and layouts
pub mod entities;

/// Geometric primitives
pub mod geometry;

/// Mapping between model space (mm) and canvas space (px)
pub mod viewport;

/// Turning a layout into a frame of draw commands
pub mod render;

/// Hit-testing, hover and selection
pub mod interaction;

/// Manual distribution of items over two capacity-constrained containers
pub mod allocation;

/// Callbacks exposed to the host application
pub mod events;

/// The layout viewer, tying viewport, interaction and renderer together
pub mod viewer;

/// Guarding against out-of-order responses of successive layout requests
pub mod sequencing;

/// Importing layouts from and exporting them to the external representation, SVG export
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
