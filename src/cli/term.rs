//! Terminal implementations of the presentation seams.

use crate::habits::Notifier;
use crate::session::{Navigator, Surface};

/// Prints navigation guidance instead of switching screens; in a terminal
/// every surface is just the shell prompt.
pub struct TermNavigator;

impl Navigator for TermNavigator {
    fn goto(&mut self, surface: Surface) {
        match surface {
            // Logging out lands back at the prompt; nothing to announce.
            Surface::Landing => {}
            Surface::Login => eprintln!("You are not logged in. Run `habitctl login` first."),
            Surface::Dashboard => {
                eprintln!("Already logged in. Run `habitctl logout` to switch accounts.");
            }
        }
    }
}

/// Prints success/error outcomes in the usual check-mark style.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn success(&mut self, message: &str) {
        println!("✓ {message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("✗ {message}");
    }
}
