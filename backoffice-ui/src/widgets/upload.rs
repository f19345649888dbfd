//! File upload progress.

use tabledom::{Color, Element, Size, Style};

use crate::error::UploadError;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    max_size: u64,
    phase: UploadPhase,
    percent: u8,
}

impl UploadProgress {
    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            phase: UploadPhase::Idle,
            percent: 0,
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Reject a file before any bytes are sent.
    pub fn check(&self, size: u64) -> Result<(), UploadError> {
        if size > self.max_size {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Validate `size` and enter the uploading phase.
    pub fn start(&mut self, size: u64) -> Result<(), UploadError> {
        if self.phase == UploadPhase::Uploading {
            return Err(UploadError::InProgress);
        }
        if let Err(e) = self.check(size) {
            self.phase = UploadPhase::Failed(e.to_string());
            return Err(e);
        }
        self.phase = UploadPhase::Uploading;
        self.percent = 0;
        Ok(())
    }

    pub fn progress(&mut self, loaded: u64, total: u64) {
        if self.phase != UploadPhase::Uploading {
            return;
        }
        self.percent = if total == 0 {
            100
        } else {
            (loaded.saturating_mul(100) / total).min(100) as u8
        };
    }

    pub fn finish(&mut self) {
        self.phase = UploadPhase::Done;
        self.percent = 100;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("upload failed: {message}");
        self.phase = UploadPhase::Failed(message);
    }

    pub fn reset(&mut self) {
        self.phase = UploadPhase::Idle;
        self.percent = 0;
    }

    /// `[#####...............]  25%`
    pub fn bar(&self) -> String {
        let filled = usize::from(self.percent) * BAR_WIDTH / 100;
        format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            self.percent
        )
    }

    pub fn element(&self) -> Element {
        let (text, color) = match &self.phase {
            UploadPhase::Idle => (String::new(), Color::oklch(0.8, 0.0, 0.0)),
            UploadPhase::Uploading => (self.bar(), Color::oklch(0.75, 0.1, 250.0)),
            UploadPhase::Done => (self.bar(), Color::oklch(0.7, 0.15, 145.0)),
            UploadPhase::Failed(message) => (message.clone(), Color::oklch(0.65, 0.2, 25.0)),
        };
        Element::div()
            .class("progress")
            .height(Size::Fixed(1))
            .child(Element::text(text).style(Style::new().foreground(color)))
    }
}
