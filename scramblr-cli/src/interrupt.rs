use std::sync::atomic::{AtomicBool, Ordering};

/// Set while a rename run is in flight.
static RUN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// RAII helper that marks a run as active while it is in scope.
pub struct RunActiveGuard;

impl RunActiveGuard {
    pub fn activate() -> Self {
        RUN_ACTIVE.store(true, Ordering::SeqCst);
        Self
    }
}

impl Drop for RunActiveGuard {
    fn drop(&mut self) {
        RUN_ACTIVE.store(false, Ordering::SeqCst);
    }
}

pub fn run_active() -> bool {
    RUN_ACTIVE.load(Ordering::SeqCst)
}

/// Ctrl-C cannot stop a run halfway; it only exits between runs.
pub fn install_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if run_active() {
            eprintln!("\nRename in progress. It will finish before scramblr exits.");
        } else {
            eprintln!("\nInterrupted.");
            std::process::exit(130);
        }
    })
}
