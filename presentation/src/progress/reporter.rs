//! Progress reporting for pipeline runs
//!
//! Both reporters write to stderr so stdout carries only the result.

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use swarm_application::ProgressSink;
use swarm_domain::{AgentStatus, ProgressEvent, Stage};

/// Reports progress with one indicatif bar per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<(Stage, ProgressBar)>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    /// Reporter that renders nothing, for tests.
    pub fn hidden() -> Self {
        Self::with_multi(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    fn with_multi(multi: MultiProgress) -> Self {
        Self {
            multi,
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    /// "[3/10] Checking for conflicts"
    pub fn stage_display_name(stage: Stage) -> String {
        format!("[{}/{}] {}", stage.number(), Stage::ALL.len(), stage.label())
    }

    /// Stage currently shown, if any.
    pub fn current_stage(&self) -> Option<Stage> {
        self.stage_bar
            .lock()
            .ok()
            .and_then(|bar| bar.as_ref().map(|(stage, _)| *stage))
    }

    fn on_step_progress(&self, step: Stage, percent: u8) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };

        let is_current = matches!(slot.as_ref(), Some((stage, _)) if *stage == step);
        if !is_current {
            if let Some((_, previous)) = slot.take() {
                previous.finish();
            }
            let pb = self.multi.add(ProgressBar::new(100));
            pb.set_style(Self::stage_style());
            pb.set_prefix(Self::stage_display_name(step));
            *slot = Some((step, pb));
        }

        if let Some((_, pb)) = slot.as_ref() {
            pb.set_position(u64::from(percent));
            if percent >= 100 {
                pb.finish_with_message("done".green().to_string());
            }
        }
    }

    fn set_message(&self, message: String) {
        if let Ok(slot) = self.stage_bar.lock()
            && let Some((_, pb)) = slot.as_ref()
        {
            pb.set_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressReporter {
    fn emit(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::StepProgress { step, percent, .. } => {
                self.on_step_progress(step, percent);
            }
            ProgressEvent::AgentStart {
                agent_name, model, ..
            } => {
                self.set_message(format!("{} {} ({})", "->".cyan(), agent_name, model));
            }
            ProgressEvent::AgentFinish {
                agent_name,
                model,
                status,
                duration_ms,
                error,
                ..
            } => {
                let line = match status {
                    AgentStatus::Completed => format!(
                        "  {} {} ({}, {}ms)",
                        "v".green(),
                        agent_name,
                        model,
                        duration_ms
                    ),
                    AgentStatus::Failed => format!(
                        "  {} {} ({}): {}",
                        "x".red(),
                        agent_name,
                        model,
                        error.as_deref().unwrap_or("failed")
                    ),
                };
                let _ = self.multi.println(line);
            }
            ProgressEvent::Log { message, .. } => {
                self.set_message(message);
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SimpleProgress {
    /// Line printed for an event, or `None` for events this reporter skips.
    pub fn render(event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::StepProgress { step, percent, .. } if *percent == 0 => Some(format!(
                "{} {}",
                "->".cyan(),
                ProgressReporter::stage_display_name(*step).bold()
            )),
            ProgressEvent::StepProgress { .. } | ProgressEvent::AgentStart { .. } => None,
            ProgressEvent::AgentFinish {
                agent_name,
                model,
                status: AgentStatus::Completed,
                ..
            } => Some(format!("  {} {} ({})", "v".green(), agent_name, model)),
            ProgressEvent::AgentFinish {
                agent_name,
                model,
                error,
                ..
            } => Some(format!(
                "  {} {} ({}) failed: {}",
                "x".red(),
                agent_name,
                model,
                error.as_deref().unwrap_or("unknown error")
            )),
            ProgressEvent::Log { message, .. } => Some(format!("  {}", message.dimmed())),
        }
    }
}

impl ProgressSink for SimpleProgress {
    fn emit(&self, event: ProgressEvent) {
        if let Some(line) = Self::render(&event) {
            eprintln!("{line}");
        }
    }
}
