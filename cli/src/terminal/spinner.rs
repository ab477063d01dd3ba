use std::io::{self, Write};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_secs(2);
const TIPS: &[&str] = &[
    "Ledger confirmations usually take a few seconds",
    "Nothing is stored until the ledger confirms",
];

/// The spinner currently on screen, if any. Log lines are routed above it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Clears the spinner when dropped.
pub struct SpinnerGuard {
    spinner: ProgressBar,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
    }
}

/// Shows a pending-state spinner while a slow collaborator call runs.
pub fn start(message: &str, q_level: u8) -> SpinnerGuard {
    let pb = if q_level > 1 {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };

    let style = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(pb.clone());
    }
    spawn_tips(pb.clone(), message.to_string());

    SpinnerGuard { spinner: pb }
}

/// Alternates the task message with a tip until the spinner finishes.
fn spawn_tips(pb: ProgressBar, message: String) {
    thread::spawn(move || {
        let mut tip_index = 0;
        loop {
            thread::sleep(TIP_DURATION);
            if pb.is_finished() {
                break;
            }
            let tip = TIPS[tip_index % TIPS.len()];
            pb.set_message(format!("{} {}", message, format!("({tip})").italic().dimmed()));
            tip_index += 1;
        }
    });
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = ACTIVE.lock().ok().and_then(|guard| guard.clone());
        match active {
            Some(pb) if !pb.is_hidden() => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
                Ok(buf.len())
            }
            _ => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
