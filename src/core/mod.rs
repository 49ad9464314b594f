pub mod add;
pub mod backup;
pub mod config;
pub mod del;
pub mod edit;
pub mod filter;
pub mod forms;
pub mod geocode;
pub mod log;
pub mod map;
pub mod reorder;
pub mod reschedule;
pub mod timeline;
