pub mod board;
pub mod collapse;
pub mod dnd;
pub mod overlap;
pub mod slots;
pub mod timer;
pub mod zoom;
