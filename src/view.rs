// Projects controller state onto the panel the shell should show.
// Idle never exposes progress or logs left over from the previous run.

use serde::{Deserialize, Serialize};

use crate::catalog::SampleCarousel;
use crate::controller::GenerationController;
use crate::types::GenerationStatus;

/// Call-to-action badges over the finished video.
pub const UPSELLS: [&str; 3] = ["4K UNLOCK", "ADD MUSIC", "PRO RENDER"];

/// Right-hand panel content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum View {
    /// Sample reel while nothing is running.
    Gallery { sample_url: String, sample_index: usize },
    /// Progress ring and log console.
    Generating { progress: u8, logs: Vec<String> },
    /// Finished video with upsells.
    Result { video_url: String, upsells: Vec<String> },
}

impl View {
    pub fn project(controller: &GenerationController, samples: &SampleCarousel) -> View {
        match controller.status() {
            GenerationStatus::Idle => View::Gallery {
                sample_url: samples.current_url().unwrap_or_default().to_string(),
                sample_index: samples.index(),
            },
            GenerationStatus::InProgress => View::Generating {
                progress: controller.progress().as_u8(),
                logs: controller.logs().to_vec(),
            },
            GenerationStatus::Completed => View::Result {
                video_url: samples.first_url().unwrap_or_default().to_string(),
                upsells: UPSELLS.iter().map(|u| u.to_string()).collect(),
            },
        }
    }
}
