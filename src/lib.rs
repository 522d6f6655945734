// generation_core: Rust/WASM core for the video generation widget.
// See DESIGN.md for the module map. The run state machine lives here; JS renders and forwards input.

mod catalog;
mod controller;
mod error;
mod prompt;
mod timer;
mod types;
mod view;

use wasm_bindgen::prelude::*;

pub use catalog::{LogCatalog, SampleCarousel};
pub use controller::GenerationController;
pub use error::WidgetError;
pub use prompt::*;
pub use timer::{TimerId, TimerQueue};
pub use types::*;
pub use view::{View, UPSELLS};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: WidgetError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Widget interface exposed to JavaScript.
/// The shell calls `advance` once per animation frame with the elapsed time and re-renders
/// when it returns true.
#[wasm_bindgen]
pub struct Widget {
    controller: GenerationController,
    samples: SampleCarousel,
}

#[wasm_bindgen]
impl Widget {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Widget, JsValue> {
        let config = WidgetConfig::from_json(config_json).map_err(to_js)?;
        Ok(Widget::with_config(&config))
    }

    /// Start a run; `false` input is a silent no-op. Returns whether a run started.
    pub fn start(&mut self, has_valid_input: bool) -> bool {
        self.controller.start(has_valid_input)
    }

    /// Start from the shell's serialized `SelectionState`, validating it here.
    pub fn start_with_selection(&mut self, selection_json: &str) -> Result<bool, JsValue> {
        self.try_start_with_selection(selection_json).map_err(to_js)
    }

    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    pub fn reset(&mut self) -> bool {
        self.controller.reset()
    }

    /// Feed elapsed milliseconds since the previous call. Returns whether a re-render is needed.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        self.controller.advance(elapsed_ms)
    }

    /// Call when the hosting view unmounts. Cancels every pending timer.
    pub fn teardown(&mut self) {
        self.controller.teardown();
    }

    pub fn progress(&self) -> u8 {
        self.controller.progress().as_u8()
    }

    /// True while a run is in progress; the shell disables its start button.
    pub fn is_busy(&self) -> bool {
        self.controller.status() == GenerationStatus::InProgress
    }

    pub fn revision(&self) -> u64 {
        self.controller.revision()
    }

    pub fn next_sample(&mut self) -> usize {
        self.samples.next()
    }

    pub fn prev_sample(&mut self) -> usize {
        self.samples.prev()
    }

    /// Raw controller state: `{ status, progress, logs, revision, completion_pending }`.
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.controller.snapshot())
            .map_err(|e| to_js(WidgetError::from(e)))
    }

    /// What the right-hand panel should show, tagged by `type`.
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.view()).map_err(|e| to_js(WidgetError::from(e)))
    }
}

impl Widget {
    pub fn with_config(config: &WidgetConfig) -> Widget {
        Widget {
            controller: GenerationController::new(config),
            samples: SampleCarousel::new(config.samples.clone()),
        }
    }

    pub fn controller(&self) -> &GenerationController {
        &self.controller
    }

    pub fn samples(&self) -> &SampleCarousel {
        &self.samples
    }

    pub fn view(&self) -> View {
        View::project(&self.controller, &self.samples)
    }

    pub fn try_start_with_selection(&mut self, selection_json: &str) -> Result<bool, WidgetError> {
        let selection: SelectionState = serde_json::from_str(selection_json)
            .map_err(|e| WidgetError::InvalidSelection(e.to_string()))?;
        Ok(self.controller.start(selection.has_valid_input()))
    }
}

/// The enhancement backend's transformation, for shells that want it without a round trip.
/// Takes and returns the route's JSON bodies.
#[wasm_bindgen]
pub fn enhance_prompt_json(request_json: &str) -> Result<String, JsValue> {
    let request: EnhanceRequest = serde_json::from_str(request_json)
        .map_err(|e| to_js(WidgetError::from(e)))?;
    serde_json::to_string(&enhance_prompt(&request)).map_err(|e| to_js(WidgetError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_creation_works() {
        let widget = Widget::new("{}");
        assert!(widget.is_ok());
    }

    #[test]
    fn widget_full_run_through_facade() {
        let mut widget = Widget::new(r#"{"tick_period_ms":10,"completion_delay_ms":100}"#)
            .expect("Should parse valid config");

        assert!(widget.start(true));
        assert!(widget.is_busy());
        assert!(widget.advance(999));
        assert_eq!(widget.progress(), 99);
        widget.advance(1);
        assert_eq!(widget.progress(), 100);
        assert!(widget.is_busy());

        widget.advance(100);
        assert!(!widget.is_busy());
        let view = widget.view_json().expect("Should serialize view");
        assert!(view.contains("Result"));

        assert!(widget.reset());
        let view = widget.view_json().expect("Should serialize view");
        assert!(view.contains("Gallery"));
    }

    #[test]
    fn snapshot_json_shape() {
        let mut widget = Widget::new("{}").unwrap();
        widget.start(true);
        let snapshot: Snapshot =
            serde_json::from_str(&widget.snapshot_json().unwrap()).expect("Should parse snapshot");
        assert_eq!(snapshot.status, GenerationStatus::InProgress);
        assert_eq!(snapshot.progress.as_u8(), 0);
        assert_eq!(snapshot.logs.len(), 1);
        assert!(!snapshot.completion_pending);
    }

    #[test]
    fn start_with_selection_validates_prompt() {
        let mut widget = Widget::new("{}").unwrap();
        assert!(!widget.start_with_selection(r#"{"mode":"text","prompt":""}"#).unwrap());
        assert_eq!(widget.revision(), 0);
        assert!(widget.start_with_selection(r#"{"mode":"text","prompt":"surfing otter"}"#).unwrap());
        assert!(widget.is_busy());
    }

    #[test]
    fn bad_selection_is_typed_error() {
        let mut widget = Widget::with_config(&WidgetConfig::default());
        let err = widget.try_start_with_selection(r#"{"mode":"video"}"#).unwrap_err();
        assert!(matches!(err, WidgetError::InvalidSelection(_)));
        assert!(!widget.is_busy());
    }

    #[test]
    fn sample_navigation_wraps() {
        let mut widget = Widget::new("{}").unwrap();
        assert_eq!(widget.prev_sample(), 2);
        assert_eq!(widget.next_sample(), 0);
        assert_eq!(widget.samples().len(), 3);
    }

    #[test]
    fn teardown_freezes_widget() {
        let mut widget = Widget::new("{}").unwrap();
        widget.start(true);
        widget.teardown();
        assert!(!widget.advance(10_000));
        assert_eq!(widget.progress(), 0);
        assert_eq!(widget.controller().active_timers(), 0);
    }

    #[test]
    fn enhance_prompt_json_round() {
        let body = enhance_prompt_json(r#"{"prompt":"foggy harbor"}"#).unwrap();
        assert_eq!(
            body,
            r#"{"enhancedPrompt":"Cinematic, 8k, highly detailed: foggy harbor"}"#
        );
    }

    // Note: invalid JSON paths of the #[wasm_bindgen] methods build a JsValue, which only
    // works on wasm32; they are covered by tests/web.rs.
}
