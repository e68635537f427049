//! Terminal implementations of the core `ProgressReporter` port.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use layerforge_core::{
    application::{NoopProgress, ProgressReporter, ScaffoldReport},
    domain::Step,
};

use crate::{cli::OutputFormat, output::OutputManager};

const BAR_TEMPLATE: &str = "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}";
const PLAIN_BAR_TEMPLATE: &str = "[{bar:30}] {pos}/{len} {msg}";

/// Pick the reporter that matches the resolved output mode.
pub fn reporter_for(output: &OutputManager) -> Box<dyn ProgressReporter> {
    if output.is_quiet() || output.is_json() {
        return Box::new(NoopProgress);
    }
    match output.format() {
        OutputFormat::Human => Box::new(BarProgress::new(output.supports_color())),
        _ => Box::new(LineProgress::new()),
    }
}

/// `indicatif` bar on stderr, one tick per step.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(color: bool) -> Self {
        let template = if color { BAR_TEMPLATE } else { PLAIN_BAR_TEMPLATE };
        let style = ProgressStyle::with_template(template)
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self::with_bar(bar)
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressReporter for BarProgress {
    fn step_started(&self, _index: usize, total: usize, step: &Step) {
        self.bar.set_length(total as u64);
        self.bar.set_message(step.to_string());
    }

    fn step_finished(&self, _index: usize, _total: usize, _step: &Step) {
        self.bar.inc(1);
    }

    fn finished(&self, _report: &ScaffoldReport) {
        self.bar.finish_and_clear();
    }

    fn failed(&self, _index: usize, _total: usize, step: &Step) {
        self.bar.abandon_with_message(format!("failed: {step}"));
    }
}

/// One stdout line per step, for pipes and `--output-format plain`.
pub struct LineProgress {
    term: Term,
}

impl LineProgress {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl ProgressReporter for LineProgress {
    fn step_started(&self, index: usize, total: usize, step: &Step) {
        let _ = self.term.write_line(&step_line(index, total, step));
    }

    fn step_finished(&self, _index: usize, _total: usize, _step: &Step) {}

    fn finished(&self, _report: &ScaffoldReport) {}

    fn failed(&self, index: usize, total: usize, step: &Step) {
        let _ = self
            .term
            .write_line(&format!("{} failed", step_line(index, total, step)));
    }
}

fn step_line(index: usize, total: usize, step: &Step) -> String {
    let width = total.to_string().len();
    format!("[{index:>width$}/{total}] {step}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Step {
        Step::CreateSolution {
            name: "Shop".into(),
        }
    }

    #[test]
    fn step_line_pads_index() {
        assert_eq!(step_line(3, 13, &step()), "[ 3/13] create solution Shop");
        assert_eq!(step_line(3, 9, &step()), "[3/9] create solution Shop");
    }

    #[test]
    fn bar_ticks_once_per_finished_step() {
        let progress = BarProgress::with_bar(ProgressBar::hidden());
        progress.step_started(1, 13, &step());
        progress.step_finished(1, 13, &step());
        progress.step_started(2, 13, &step());

        assert_eq!(progress.bar.position(), 1);
        assert_eq!(progress.bar.length(), Some(13));
    }

    #[test]
    fn bar_is_abandoned_on_failure() {
        let progress = BarProgress::with_bar(ProgressBar::hidden());
        progress.step_started(1, 3, &step());
        progress.failed(1, 3, &step());
        assert!(progress.bar.is_finished());
    }
}
