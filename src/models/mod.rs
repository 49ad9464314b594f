pub mod bridge;
pub mod category;
pub mod event;
pub mod item;
pub mod visit;
