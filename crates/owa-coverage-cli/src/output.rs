//! Output formatting, progress reporting and run export

use crate::error::CliResult;
use crate::runner::{RunRecord, StopReason};
use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Progress reporter for experiment runs
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Reporter that never draws anything except failures
    #[must_use]
    pub fn hidden() -> Self {
        Self::new(false, true)
    }

    /// Start a bar for a bounded run, or a spinner when `total` is unknown
    pub fn start(&mut self, total: Option<u64>, message: &str) {
        if self.quiet {
            return;
        }

        let pb = match total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {pos} ticks {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb.enable_steady_tick(Duration::from_millis(120));
                pb
            }
        };
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Update progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Finish and clear the current bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "DONE".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&styled);
    }

    /// Print the outcome of one run and where it was written
    pub fn run_summary(&self, record: &RunRecord, path: &Path) {
        if self.quiet {
            return;
        }

        let report = &record.report;
        let bounds = report.last.map_or_else(
            || "no sample".to_string(),
            |p| {
                format!(
                    "LB {} | MinUC {} | MaxUC {} | UB {}",
                    p.lower, p.min_uncover, p.max_uncover, p.upper
                )
            },
        );
        let gap = record
            .remaining_gap
            .map_or_else(|| "n/a".to_string(), |g| format!("{g:.2}%"));
        let line = format!(
            "{} {} after {} ticks in {:.2}s ({bounds}, gap {gap})",
            record.id,
            record.stop_reason,
            report.ticks,
            report.elapsed.as_secs_f64(),
        );

        let status = if self.use_color {
            let styled = match record.stop_reason {
                StopReason::Saturated | StopReason::GapClosed => Style::new().green().bold(),
                StopReason::Exhausted => Style::new().yellow().bold(),
            };
            styled.apply_to("■").to_string()
        } else {
            "RUN".to_string()
        };
        let _ = self.term.write_line(&format!("{status} {line}"));

        if self.use_color {
            let _ = self
                .term
                .write_line(&format!("  {}", style(path.display()).dim()));
        } else {
            let _ = self.term.write_line(&format!("  {}", path.display()));
        }
    }

    /// Per-solver time split of a run
    pub fn solver_breakdown(&self, record: &RunRecord) {
        if self.quiet {
            return;
        }
        for solver in &record.report.solvers {
            let _ = self.term.write_line(&format!(
                "  {:<12} {:>6} calls {:>10.3}s {:>6.1}%",
                solver.kind.to_string(),
                solver.calls,
                solver.total.as_secs_f64(),
                solver.share_percent
            ));
        }
    }
}

/// Write a run as pretty JSON to `{dir}/{id}.json`
pub fn write_run(dir: &Path, record: &RunRecord) -> CliResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", record.id));
    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, record)?;
    Ok(path)
}
