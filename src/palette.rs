//! Participant colors.
//!
//! Colors are handed out by insertion index and cycle once the palette is
//! exhausted, so the sixteenth participant shares the first one's color.

pub const COLORS: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F", "#BB8FCE", "#82E0AA",
    "#F1948A", "#85C1E9", "#76D7C4", "#F8C471", "#C39BD3", "#7FB3D5", "#D98880",
];

/// Color for the participant at `index` in insertion order
pub fn color_for_index(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}
