pub mod form;
pub mod header;
pub mod history;
pub mod progress;
pub mod scores;
pub mod statusbar;
