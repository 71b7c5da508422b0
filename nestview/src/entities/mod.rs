mod container;
mod layout;
mod placed_item;
mod priority;

#[doc(inline)]
pub use container::Container;

#[doc(inline)]
pub use layout::Layout;

#[doc(inline)]
pub use layout::LayoutMetrics;

#[doc(inline)]
pub use placed_item::PlacedItem;

#[doc(inline)]
pub use priority::Priority;
