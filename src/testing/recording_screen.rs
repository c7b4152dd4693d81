use std::sync::mpsc::Sender;

use crate::domain::AppError;
use crate::domain::game::{Control, Frame};
use crate::ports::GameScreen;

/// Screen that keeps every frame and can press keys in reaction to what it shows.
#[derive(Default)]
pub struct RecordingScreen {
    pub frames: Vec<Frame>,
    triggers: Vec<(String, Control)>,
    keys: Option<Sender<Control>>,
    max_frames: Option<usize>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `control` whenever a presented frame contains `text`.
    pub fn press_when(mut self, text: &str, control: Control, keys: Sender<Control>) -> Self {
        self.triggers.push((text.to_string(), control));
        self.keys = Some(keys);
        self
    }

    /// Send `Quit` once this many frames have been presented.
    pub fn quit_after(mut self, frames: usize, keys: Sender<Control>) -> Self {
        self.max_frames = Some(frames);
        self.keys = Some(keys);
        self
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl GameScreen for RecordingScreen {
    fn present(&mut self, frame: &Frame) -> Result<(), AppError> {
        self.frames.push(frame.clone());
        if let Some(keys) = &self.keys {
            for (text, control) in &self.triggers {
                if frame.contains_text(text) {
                    let _ = keys.send(*control);
                }
            }
            if self.max_frames.is_some_and(|max| self.frames.len() >= max) {
                let _ = keys.send(Control::Quit);
            }
        }
        Ok(())
    }
}
