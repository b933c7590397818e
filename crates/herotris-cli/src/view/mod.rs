pub mod hero;
pub mod widgets;
