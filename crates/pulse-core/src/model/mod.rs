pub mod booking;
pub mod menu;
pub mod orders;
