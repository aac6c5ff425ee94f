pub mod authentication_controller;
pub mod screen_controller;
