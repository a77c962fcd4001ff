use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::terminal::colors;

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Spinner shown while a snapshot is being collected.
pub struct SpinnerHandle {
    spinner: ProgressBar,
}

impl SpinnerHandle {
    pub fn finish_and_clear(self) {
        if let Ok(mut active) = ACTIVE.lock() {
            active.take();
        }
        self.spinner.finish_and_clear();
    }
}

pub fn start(msg: &str) -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg.color(colors::TEXT_DEFAULT).to_string());

    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(pb.clone());
    }

    SpinnerHandle { spinner: pb }
}

/// Prints `buf` above the running spinner.
///
/// Returns `false` when no spinner is running and the caller must write itself.
pub fn println_above(buf: &[u8]) -> bool {
    let Ok(active) = ACTIVE.lock() else {
        return false;
    };
    match active.as_ref() {
        Some(pb) => {
            let msg = String::from_utf8_lossy(buf);
            pb.println(msg.trim_end());
            true
        }
        None => false,
    }
}
