/// Presentation layer
///
/// Every view here only reads from the `Session` and emits `Message`s;
/// no state lives in the widgets themselves.

pub mod compare_bar;
pub mod comparison;
pub mod gallery;

use iced::Color;

/// Window width below which the comparison shows one product at a time
pub const NARROW_WIDTH: f32 = 640.0;

/// Accent for spec values that differ across the selection
pub const DIFFERS_COLOR: Color = Color::from_rgb(0.06, 0.73, 0.51);

/// Muted tone for "N/A" values and secondary captions
pub const MUTED_COLOR: Color = Color::from_rgb(0.55, 0.57, 0.60);

/// First two words of a product name, for compact tabs and chips
pub fn short_name(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
