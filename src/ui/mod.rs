pub mod cards;
pub mod map_view;
pub mod messages;
pub mod timeline_view;
