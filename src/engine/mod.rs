// ============================================================================
// Engine Module
// Contains the keypad controller and its factory
// ============================================================================

mod keypad_controller;

pub mod factory;

pub use factory::{create_from_config, KeypadControllerBuilder};
pub use keypad_controller::KeypadController;
