pub mod hex_color;
pub mod resize;
