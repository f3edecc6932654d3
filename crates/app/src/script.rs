use blendview_input::InputEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::{AppContext, FrameOutput};
use crate::error::AppError;

/// One scripted frame: the events delivered before it, then the frame itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Host time in seconds at which the frame runs.
    pub time: f64,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// Recorded or hand-written input for headless runs.
///
/// ```yaml
/// frames:
///   - time: 0.016
///     events:
///       - key: { key: W, pressed: true }
///   - time: 0.033
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        let script: Self = serde_yaml::from_str(yaml)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let script = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), frames = script.frames.len(), "input script loaded");
        Ok(script)
    }

    /// Frame times must be finite, non-negative and non-decreasing.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut last = 0.0;
        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.time.is_finite() || frame.time < last {
                return Err(AppError::InvalidScript(format!(
                    "frame {index}: time must be finite and >= {last}, got {}",
                    frame.time
                )));
            }
            last = frame.time;
        }
        Ok(())
    }

    /// Play the script into `ctx`. Stops after the first frame that requests quit.
    pub fn run(&self, ctx: &mut AppContext) -> Vec<FrameOutput> {
        let mut outputs = Vec::with_capacity(self.frames.len());
        for frame in &self.frames {
            for event in &frame.events {
                ctx.handle_event(event);
            }
            let output = ctx.frame(frame.time);
            outputs.push(output);
            if output.quit {
                break;
            }
        }
        outputs
    }
}
