use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::{Duration, Instant};

const MAX_STORED_WARNINGS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum ProgressMode {
    Auto,
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedProgressMode {
    Rich,
    Plain,
    Quiet,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressConfig {
    pub mode: ProgressMode,
    tty_override: Option<bool>,
}

impl ProgressConfig {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            tty_override: None,
        }
    }

    #[cfg(test)]
    pub fn with_tty_override(mut self, is_tty: bool) -> Self {
        self.tty_override = Some(is_tty);
        self
    }

    pub fn resolve_mode(self) -> ResolvedProgressMode {
        self.mode.resolve(
            self.tty_override
                .unwrap_or_else(|| std::io::stderr().is_terminal()),
        )
    }
}

impl ProgressMode {
    fn resolve(self, stderr_is_tty: bool) -> ResolvedProgressMode {
        match self {
            ProgressMode::Auto => {
                if stderr_is_tty {
                    ResolvedProgressMode::Rich
                } else {
                    ResolvedProgressMode::Plain
                }
            }
            ProgressMode::Rich => ResolvedProgressMode::Rich,
            ProgressMode::Plain => ResolvedProgressMode::Plain,
            ProgressMode::Quiet => ResolvedProgressMode::Quiet,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressOutcome {
    pub elapsed: Duration,
    pub files: u64,
    pub warning_count: usize,
    pub warnings: Vec<String>,
}

/// Stage/count reporter for one pipeline run. Output goes to stderr so
/// stdout stays free for the summary and `--dry-run` / `--json` payloads.
pub struct ProgressReporter {
    label: String,
    mode: ResolvedProgressMode,
    started: Instant,
    stage: String,
    files: u64,
    warning_count: usize,
    warnings: Vec<String>,
    spinner: Option<ProgressBar>,
    finalized: bool,
}

impl ProgressReporter {
    pub fn new(label: impl Into<String>, config: ProgressConfig) -> Self {
        let label = label.into();
        let mode = config.resolve_mode();

        let spinner = if mode == ResolvedProgressMode::Rich {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] {prefix:.bold} {msg}",
                )
                .expect("valid spinner template")
                .tick_chars("|/-\\ "),
            );
            pb.set_prefix(label.clone());
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        let mut reporter = Self {
            label,
            mode,
            started: Instant::now(),
            stage: String::new(),
            files: 0,
            warning_count: 0,
            warnings: Vec::new(),
            spinner,
            finalized: false,
        };
        reporter.set_stage("starting");
        reporter
    }

    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.stage = stage.into();
        self.render();
    }

    pub fn inc(&mut self, files: u64) {
        if files == 0 {
            return;
        }
        self.files = self.files.saturating_add(files);
        if let Some(pb) = &self.spinner {
            pb.set_message(self.status_line());
        }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        self.emit_message("INFO", message.as_ref());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.emit_message("WARN", &message);
        self.warning_count += 1;
        if self.warnings.len() >= MAX_STORED_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(message);
    }

    pub fn finish(mut self, final_message: impl Into<String>) -> ProgressOutcome {
        self.finalize(Some(final_message.into()))
    }

    fn status_line(&self) -> String {
        format!("stage={} files={}", self.stage, self.files)
    }

    fn render(&self) {
        match self.mode {
            ResolvedProgressMode::Rich => {
                if let Some(pb) = &self.spinner {
                    pb.set_message(self.status_line());
                }
            }
            ResolvedProgressMode::Plain => {
                eprintln!(
                    "[PROGRESS] {} elapsed={} {}",
                    self.label,
                    format_duration(self.started.elapsed()),
                    self.status_line()
                );
            }
            ResolvedProgressMode::Quiet => {}
        }
    }

    fn emit_message(&self, level: &str, message: &str) {
        match self.mode {
            ResolvedProgressMode::Quiet => {}
            ResolvedProgressMode::Plain => {
                eprintln!("[{}] {}: {}", level, self.label, message);
            }
            ResolvedProgressMode::Rich => {
                if let Some(pb) = &self.spinner {
                    pb.println(format!("[{}] {}: {}", level, self.label, message));
                } else {
                    eprintln!("[{}] {}: {}", level, self.label, message);
                }
            }
        }
    }

    fn finalize(&mut self, final_message: Option<String>) -> ProgressOutcome {
        if !self.finalized {
            self.finalized = true;
            match self.mode {
                ResolvedProgressMode::Quiet => {}
                ResolvedProgressMode::Plain => {
                    self.render();
                    if let Some(msg) = final_message.as_deref() {
                        eprintln!("[DONE] {}: {}", self.label, msg);
                    }
                }
                ResolvedProgressMode::Rich => {
                    if let Some(pb) = &self.spinner {
                        match final_message {
                            Some(msg) => pb.finish_with_message(msg),
                            None => pb.finish_and_clear(),
                        }
                    }
                }
            }
        }

        ProgressOutcome {
            elapsed: self.started.elapsed(),
            files: self.files,
            warning_count: self.warning_count,
            warnings: self.warnings.clone(),
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        let _ = self.finalize(None);
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> ProgressConfig {
        ProgressConfig::new(ProgressMode::Quiet)
    }

    #[test]
    fn mode_resolution_respects_tty_override() {
        let cfg_tty = ProgressConfig::new(ProgressMode::Auto).with_tty_override(true);
        assert_eq!(cfg_tty.resolve_mode(), ResolvedProgressMode::Rich);

        let cfg_not_tty = ProgressConfig::new(ProgressMode::Auto).with_tty_override(false);
        assert_eq!(cfg_not_tty.resolve_mode(), ResolvedProgressMode::Plain);

        let cfg_quiet = ProgressConfig::new(ProgressMode::Quiet).with_tty_override(true);
        assert_eq!(cfg_quiet.resolve_mode(), ResolvedProgressMode::Quiet);
    }

    #[test]
    fn outcome_counts_files_and_warnings() {
        let mut reporter = ProgressReporter::new("channels", quiet());
        reporter.set_stage("scan");
        reporter.inc(3);
        reporter.inc(0);
        reporter.inc(2);
        reporter.warn("collision");
        let outcome = reporter.finish("done");
        assert_eq!(outcome.files, 5);
        assert_eq!(outcome.warning_count, 1);
        assert_eq!(outcome.warnings, vec!["collision".to_string()]);
    }

    #[test]
    fn stored_warnings_are_capped_but_counted() {
        let mut reporter = ProgressReporter::new("channels", quiet());
        for i in 0..(MAX_STORED_WARNINGS + 5) {
            reporter.warn(format!("w{i}"));
        }
        let outcome = reporter.finish("done");
        assert_eq!(outcome.warning_count, MAX_STORED_WARNINGS + 5);
        assert_eq!(outcome.warnings.len(), MAX_STORED_WARNINGS);
        assert_eq!(outcome.warnings[0], "w5");
    }

    #[test]
    fn durations_format_as_clock() {
        assert_eq!(format_duration(Duration::from_secs(65)), "01:05");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "01:02:05");
    }
}
