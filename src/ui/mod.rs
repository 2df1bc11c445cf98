pub mod controls;
pub mod format;
pub mod visibility;
