/// Exporting layouts to the external representation
pub mod export;

/// External (serializable) representation of layouts and allocation plans
pub mod ext_repr;

/// Importing the external representation into validated entities
pub mod import;

/// Drawing frames and layouts as SVG
pub mod svg;
