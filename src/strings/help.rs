//! # Help Text
//!
//! Displayed to the user via the `.help` command.

pub const MAIN: &str = concat!(
    "ViralForge Help\n",
    "\n",
    "Answer each question by typing the option number, the option name,\n",
    "or free text where no options are listed.\n",
    "\n",
    "Commands\n",
    "* .start         Begin the questionnaire\n",
    "* .restart       Clear all answers and start over\n",
    "* .retry         Regenerate the strategy\n",
    "* .shocking      Regenerate with a more shocking tone\n",
    "* .emotional     Regenerate with a more emotional tone\n",
    "* .professional  Regenerate with a more professional tone\n",
    "* .help          Show this help\n",
    "* .quit          Exit",
);
