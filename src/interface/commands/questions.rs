//! # Questions Command
//!
//! Prints the question catalog with its options.

use crate::application::wizard::WizardController;
use crate::interface::render;

pub fn handle_questions(wizard: &WizardController) {
    print!("{}", render::catalog(wizard.questions()));
}
