mod frame_to_svg;
pub mod svg_util;

pub use frame_to_svg::frame_to_svg;
pub use frame_to_svg::layout_to_svg;
