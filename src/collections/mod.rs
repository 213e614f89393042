mod arena;
pub mod linked_container;

pub use linked_container::{ContainerError, ContainerResult, Cursor, Iter, LinkedContainer};
