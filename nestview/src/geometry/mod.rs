mod point;
mod rect;

#[doc(inline)]
pub use point::Point;

#[doc(inline)]
pub use rect::Rect;
