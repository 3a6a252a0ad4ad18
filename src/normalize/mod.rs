pub mod chunk;
pub mod date;
pub mod names;
pub mod text;
