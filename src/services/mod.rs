pub mod images;
pub mod providers;
pub mod search;
