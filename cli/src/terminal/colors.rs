use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const FLAG: Color = Color::BrightYellow;
pub const TX_HASH: Color = Color::Magenta;
pub const GOOD: Color = Color::Green;
pub const BAD: Color = Color::Red;
