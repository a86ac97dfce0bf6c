use super::common::Float;
use std::io::Write;
use std::sync::{Arc, atomic::{AtomicBool, AtomicU64, Ordering}};
use std::thread::{JoinHandle, sleep, spawn};
use std::time::{Duration, Instant};
use terminal_size::{Width, terminal_size};

/// Terminal progress bar for long batch passes such as rebuilding the distance
/// curves of every vehicle. Updates come from any thread; a background thread
/// redraws the bar.
pub struct ProgressReporter {
    total_work: u64,
    start_time: Instant,
    work_done: Arc<AtomicU64>,
    exit_thread: Arc<AtomicBool>,
    update_thread: Option<JoinHandle<()>>
}

impl ProgressReporter {
    pub fn new(total_work: u64, title: &str, quiet: bool) -> ProgressReporter {
        let mut reporter = ProgressReporter {
            total_work: total_work.max(1),
            start_time: Instant::now(),
            work_done: Arc::new(AtomicU64::new(0)),
            exit_thread: Arc::new(AtomicBool::new(false)),
            update_thread: None
        };
        if quiet {
            return reporter;
        }
        let width = match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => {
                debug!("no terminal, progress for \"{}\" is not shown", title);
                return reporter;
            }
        };
        let work_done = reporter.work_done.clone();
        let exit_thread = reporter.exit_thread.clone();
        let total = reporter.total_work;
        let start_time = reporter.start_time;
        let title = title.to_string();
        reporter.update_thread = Some(spawn(move || {
            let bar_length = width.saturating_sub(28 + title.len()).max(2);
            let mut sleep_duration = Duration::from_millis(250);
            let mut iterations = 0;
            loop {
                let exiting = exit_thread.load(Ordering::SeqCst);
                let fraction = work_done.load(Ordering::SeqCst) as Float / total as Float;
                let filled = ((bar_length as Float * fraction).round() as usize).min(bar_length);
                let seconds = start_time.elapsed().as_millis() as Float / 1000.0;
                let remaining = seconds / fraction - seconds;
                let timing = if fraction >= 1.0 {
                    format!("({:.1}s)       ", seconds)
                } else if remaining.is_finite() {
                    format!("({:.1}s|{:.1}s)  ", seconds, remaining.max(0.0))
                } else {
                    format!("({:.1}s|?s)  ", seconds)
                };
                print!("\r{}: [{}{}] {}", title, "+".repeat(filled), " ".repeat(bar_length - filled), timing);
                if let Err(e) = std::io::stdout().flush() {
                    warn!("progress bar for \"{}\" stopped: {}", title, e);
                    break;
                }
                if exiting {
                    println!();
                    break;
                }
                sleep(sleep_duration);
                // Back off after a while to keep the overhead down.
                iterations += 1;
                if iterations == 10 || iterations == 70 {
                    sleep_duration *= 2;
                }
            }
        }));
        reporter
    }

    /// Record `num` more units of finished work.
    pub fn update(&self, num: u64) {
        if num > 0 {
            self.work_done.fetch_add(num, Ordering::SeqCst);
        }
    }

    pub fn work_done(&self) -> u64 {
        self.work_done.load(Ordering::SeqCst)
    }

    pub fn done(&self) {
        self.work_done.store(self.total_work, Ordering::SeqCst);
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.done();
        self.exit_thread.store(true, Ordering::SeqCst);
        if let Some(handle) = self.update_thread.take() {
            if handle.join().is_err() {
                error!("progress bar thread panicked");
            }
        }
    }
}
