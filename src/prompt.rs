// User selection, prompt helpers, and the prompt-enhancement backend contract.
// The shell owns the selection; the engine only validates it and transforms prompt text.
// See DESIGN.md: prompt.rs

use serde::{Deserialize, Serialize};

/// Style tags offered above the prompt box.
pub const STYLE_TAGS: [&str; 4] = ["Cyberpunk", "Pixar Style", "Cinematic", "Drone Shot"];

pub const MODELS: [&str; 2] = ["Hailuo 2.3 Turbo", "V4 Cinematic"];
pub const RATIOS: [&str; 2] = ["16:9", "9:16"];
pub const QUALITIES: [&str; 2] = ["HD", "4K PRO"];
pub const DURATIONS: [&str; 2] = ["5s", "15s"];

const MAGIC_PREFIX: &str = "Cinematic Pixar style: ";

/// Route served by the enhancement backend.
pub const ENHANCE_ROUTE: &str = "/api/enhance";
const ENHANCE_PREFIX: &str = "Cinematic, 8k, highly detailed: ";

/// Active input tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Image,
}

/// Generation options picked in the dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_ratio")]
    pub ratio: String,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_duration")]
    pub duration: String,
}

fn default_model() -> String {
    MODELS[0].to_string()
}

fn default_ratio() -> String {
    RATIOS[0].to_string()
}

// Initial value is not one of QUALITIES; the picker starts there until the user chooses.
fn default_quality() -> String {
    "Full HD".to_string()
}

fn default_duration() -> String {
    DURATIONS[0].to_string()
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            model: default_model(),
            ratio: default_ratio(),
            quality: default_quality(),
            duration: default_duration(),
        }
    }
}

/// Everything the shell collects before a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionState {
    #[serde(default)]
    pub mode: InputMode,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

impl SelectionState {
    /// Text mode needs a prompt; image mode is always accepted.
    pub fn has_valid_input(&self) -> bool {
        match self.mode {
            InputMode::Text => !self.prompt.is_empty(),
            InputMode::Image => true,
        }
    }

    /// Replace the prompt with a tag stub, e.g. `"Cyberpunk: "`.
    pub fn apply_tag(&mut self, tag: &str) {
        self.prompt = format!("{tag}: ");
    }

    /// The sparkle button: prefix the current prompt with a fixed style.
    pub fn magic_enhance(&mut self) {
        self.prompt.insert_str(0, MAGIC_PREFIX);
    }
}

/// Request body for [`ENHANCE_ROUTE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub prompt: String,
}

/// Response body for [`ENHANCE_ROUTE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_prompt: String,
}

/// The backend's transformation. Stateless; never part of the generation path.
pub fn enhance_prompt(request: &EnhanceRequest) -> EnhanceResponse {
    EnhanceResponse {
        enhanced_prompt: format!("{ENHANCE_PREFIX}{}", request.prompt),
    }
}
