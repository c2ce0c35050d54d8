pub mod edge;
pub mod layout;
pub mod piece;
pub mod shape;
