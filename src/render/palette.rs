//! Chart colors.

use plotters::style::RGBColor;

/// ColorBrewer "Set2", the qualitative palette used for slices and stacks.
pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

pub const LIME_GREEN: RGBColor = RGBColor(50, 205, 50);
pub const ORANGE: RGBColor = RGBColor(255, 127, 14);
pub const ACCESS_BLUE: RGBColor = RGBColor(31, 119, 180);
pub const MUTATE_RED: RGBColor = RGBColor(214, 39, 40);
pub const TX_GREEN: RGBColor = RGBColor(44, 160, 44);

/// The `index`-th categorical color, cycling through [`SET2`].
pub fn categorical(index: usize) -> RGBColor {
    SET2[index % SET2.len()]
}
