// Core modules implementing storage, point access, traversal, and error modeling.
pub mod access;
pub mod error;
pub mod render;
pub mod table;
pub mod traverse;
