// greeting_core: Rust/WASM engine for the interactive greeting page.
// All timing, navigation and state lives here; the JS shell renders frames and
// forwards DOM events.

mod binding;
mod catalog;
mod config;
mod error;
mod evasive;
mod lightbox;
mod logging;
mod progress;
mod reveal;
mod session;
mod timer;
mod types;
mod view_state;

use wasm_bindgen::prelude::*;

pub use binding::{ListenerAction, ListenerBinding, ListenerCommand, ListenerKind};
pub use catalog::{
    CardStack, Catalog, CollageCard, GalleryCaption, GatewayContent, IntroContent, LayoutHint,
    Letter, MediaItem, NoteCard, NoteContent, PageContent, Placement,
};
pub use config::{
    EvasiveSettings, ExperienceConfig, LoadingSettings, RevealSettings, SpringSettings,
    MAX_LOADING_STEPS,
};
pub use error::EngineError;
pub use evasive::{repulsion, EvasiveControl, EvasiveState, PointerSample};
pub use lightbox::{
    Lightbox, LightboxKey, LightboxView, SelectionState, SlidePose, SlideTransition,
};
pub use progress::{ProgressPhase, ProgressSimulation};
pub use reveal::{
    assign_delays, GroupDelays, HostSource, RandomSource, RevealBatch, RevealGroup, RevealLatch,
    RevealPlan, RevealTrigger, SectionReveal, SeededSource, SequenceSource,
};
pub use session::{Frame, Input, ProgressReport, Session};
pub use timer::{Interval, OneShot};
pub use types::*;
pub use view_state::{ViewStateController, ViewTransition};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Page engine exposed to JavaScript.
/// Batch interface: one `process` call per animation frame.
#[wasm_bindgen]
pub struct Experience {
    session: Session,
}

#[wasm_bindgen]
impl Experience {
    /// `config_json` may be `"{}"` for the built-in page.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Experience, JsValue> {
        let config = ExperienceConfig::from_json(config_json).map_err(to_js)?;
        logging::install(&config.log_level).map_err(to_js)?;
        let session = Session::new(config).map_err(to_js)?;
        Ok(Experience { session })
    }

    /// Advance to `now_ms` (the host clock) and apply a JSON array of inputs.
    /// Returns the resulting frame as JSON.
    pub fn process(&mut self, now_ms: f64, inputs_json: &str) -> Result<String, JsValue> {
        let inputs: Vec<Input> = serde_json::from_str(inputs_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid inputs: {}", e)))?;

        let frame = self.session.process(Timestamp::from_millis(now_ms), &inputs);

        serde_json::to_string(&frame)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Ordered gallery items with their layout hints.
    pub fn catalog_json(&self) -> Result<String, JsValue> {
        serialize(self.session.catalog())
    }

    /// Static copy and decorative images for every section.
    pub fn content_json(&self) -> Result<String, JsValue> {
        serialize(self.session.content())
    }

    /// The resolved configuration, defaults filled in.
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serialize(self.session.config())
    }

    /// Current view: `"gate"`, `"loading"` or `"content"`.
    pub fn view_state(&self) -> String {
        self.session.view_state().to_string()
    }

    /// Whether `section` is mounted and has played its entrance.
    pub fn is_revealed(&self, section: &str) -> Result<bool, JsValue> {
        let section: SectionId = section.parse().map_err(to_js)?;
        Ok(self.session.is_revealed(section))
    }

    /// Tear down. Returns the listener removals the shell must perform.
    pub fn dispose(&mut self) -> Result<String, JsValue> {
        serialize(&self.session.dispose())
    }
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
