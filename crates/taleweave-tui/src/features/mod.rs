pub mod form;
pub mod player;
pub mod story;
