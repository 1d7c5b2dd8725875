// Composition root: owns every component, routes a batch of shell inputs to
// them in arrival order, and reports what the shell has to do next.

use serde::{Deserialize, Serialize};

use crate::binding::{ListenerBinding, ListenerCommand, ListenerKind};
use crate::catalog::{Catalog, PageContent};
use crate::config::ExperienceConfig;
use crate::error::EngineError;
use crate::evasive::{EvasiveControl, PointerSample};
use crate::lightbox::{Lightbox, LightboxKey, LightboxView};
use crate::progress::ProgressPhase;
use crate::reveal::{HostSource, RandomSource, RevealBatch, RevealPlan, SectionReveal, SeededSource};
use crate::types::{Offset, SectionId, Timestamp, ViewState};
use crate::view_state::{ViewStateController, ViewTransition};

/// Discrete input from the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// The gateway's accept button was pressed.
    Enter,
    /// `keydown` with the DOM `key` value.
    Key { key: String },
    PointerMove(PointerSample),
    /// IntersectionObserver callback for a section.
    SectionVisibility { section: SectionId, ratio: f64 },
    OpenLightbox { index: usize },
    CloseLightbox,
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressReport {
    pub percent: f64,
    pub display_percent: u8,
    pub phase: ProgressPhase,
}

/// Everything the shell needs to render after a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub view: ViewState,
    pub progress: Option<ProgressReport>,
    pub lightbox: Option<LightboxView>,
    pub evasive_offset: Offset,
    /// Reveals that fired since the previous frame.
    pub reveals: Vec<RevealBatch>,
    /// Listener registrations to add or remove, in order.
    pub listeners: Vec<ListenerCommand>,
    /// Set on the one frame where loading finished.
    pub entered_content: bool,
    /// Inputs that were refused, with the reason.
    pub rejected: Vec<String>,
}

pub struct Session {
    config: ExperienceConfig,
    view: ViewStateController,
    lightbox: Lightbox,
    keydown: ListenerBinding,
    pointer: ListenerBinding,
    evasive: EvasiveControl,
    mounted: Vec<SectionReveal>,
    random: Box<dyn RandomSource>,
    content: PageContent,
    pending_reveals: Vec<RevealBatch>,
    pending_listeners: Vec<ListenerCommand>,
    disposed: bool,
}

impl Session {
    /// Build a session with the randomness the config asks for.
    pub fn new(config: ExperienceConfig) -> Result<Self, EngineError> {
        let random: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededSource::new(seed)),
            None => Box::new(HostSource),
        };
        Self::with_source(config, random)
    }

    pub fn with_source(
        config: ExperienceConfig,
        random: Box<dyn RandomSource>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let catalog = match &config.gallery {
            Some(items) => Catalog::new(items.clone())?,
            None => Catalog::builtin(),
        };
        tracing::info!(items = catalog.len(), "greeting session created");

        let mut session = Session {
            view: ViewStateController::new(config.loading),
            lightbox: Lightbox::new(catalog),
            keydown: ListenerBinding::new(ListenerKind::Keydown),
            pointer: ListenerBinding::new(ListenerKind::Pointermove),
            evasive: EvasiveControl::new(config.evasive),
            mounted: Vec::new(),
            random,
            content: PageContent::builtin(config.letter.clone()),
            pending_reveals: Vec::new(),
            pending_listeners: Vec::new(),
            disposed: false,
            config,
        };
        session.mount(SectionId::Gateway);
        if let Some(command) = session.pointer.sync(true) {
            session.pending_listeners.push(command);
        }
        Ok(session)
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn evasive(&self) -> &EvasiveControl {
        &self.evasive
    }

    pub fn catalog(&self) -> &Catalog {
        self.lightbox.catalog()
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_mounted(&self, section: SectionId) -> bool {
        self.mounted.iter().any(|r| r.section() == section)
    }

    /// Whether a mounted section has played its entrance.
    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.mounted
            .iter()
            .any(|r| r.section() == section && r.has_fired())
    }

    /// Advance timers to `now`, then apply `inputs` in order.
    pub fn process(&mut self, now: Timestamp, inputs: &[Input]) -> Frame {
        let mut rejected = Vec::new();
        if self.disposed {
            if !inputs.is_empty() {
                rejected.push("session disposed".to_string());
            }
            return self.frame(false, rejected);
        }

        let entered_content = self.advance_timers(now);
        for input in inputs {
            tracing::debug!(?input, "input");
            if let Err(err) = self.apply(now, input) {
                tracing::warn!(%err, "input rejected");
                rejected.push(err.to_string());
            }
        }
        self.frame(entered_content, rejected)
    }

    /// Release every listener and timer. The session ignores input afterwards.
    pub fn dispose(&mut self) -> Vec<ListenerCommand> {
        let mut commands = std::mem::take(&mut self.pending_listeners);
        if self.disposed {
            return commands;
        }
        self.lightbox.close();
        commands.extend(self.keydown.dispose());
        commands.extend(self.pointer.dispose());
        self.evasive.dispose();
        self.mounted.clear();
        self.pending_reveals.clear();
        self.disposed = true;
        tracing::info!("greeting session disposed");
        commands
    }

    fn advance_timers(&mut self, now: Timestamp) -> bool {
        self.evasive.tick(now);
        match self.view.tick(now) {
            Some(transition) => {
                self.on_transition(transition);
                transition == ViewTransition::ToContent
            }
            None => false,
        }
    }

    fn apply(&mut self, now: Timestamp, input: &Input) -> Result<(), EngineError> {
        match input {
            Input::Enter => {
                if let Some(transition) = self.view.enter(now) {
                    self.on_transition(transition);
                }
            }
            Input::Key { key } => {
                if !self.keydown.is_attached() {
                    return Ok(());
                }
                if let Some(key) = LightboxKey::from_dom_key(key) {
                    self.lightbox.handle_key(key);
                    self.sync_keydown();
                }
            }
            Input::PointerMove(sample) => {
                if self.pointer.is_attached() {
                    self.evasive.on_pointer(now, sample);
                }
            }
            Input::SectionVisibility { section, ratio } => {
                let threshold = self.config.reveal.visibility_threshold;
                let Some(reveal) = self.mounted.iter_mut().find(|r| r.section() == *section)
                else {
                    tracing::debug!(%section, "visibility for unmounted section");
                    return Ok(());
                };
                if let Some(batch) = reveal.on_visibility(*ratio, threshold, self.random.as_mut()) {
                    tracing::info!(%section, "section revealed");
                    self.pending_reveals.push(batch);
                }
            }
            Input::OpenLightbox { index } => {
                if !self.is_mounted(SectionId::Gallery) {
                    return Err(EngineError::UnknownSection(format!(
                        "{} is not mounted",
                        SectionId::Gallery
                    )));
                }
                let len = self.lightbox.catalog().len();
                if *index >= len {
                    return Err(EngineError::IndexOutOfRange { index: *index, len });
                }
                self.lightbox.open(*index);
                self.sync_keydown();
            }
            Input::CloseLightbox => {
                self.lightbox.close();
                self.sync_keydown();
            }
            Input::Next => self.lightbox.next(),
            Input::Prev => self.lightbox.prev(),
        }
        Ok(())
    }

    fn on_transition(&mut self, transition: ViewTransition) {
        match transition {
            ViewTransition::ToLoading => {
                self.evasive.dispose();
                if let Some(command) = self.pointer.dispose() {
                    self.pending_listeners.push(command);
                }
                self.unmount(SectionId::Gateway);
                self.mount(SectionId::Loading);
            }
            ViewTransition::ToContent => {
                self.unmount(SectionId::Loading);
                self.mount(SectionId::Intro);
                self.mount(SectionId::Gallery);
                self.mount(SectionId::Note);
            }
        }
    }

    fn mount(&mut self, section: SectionId) {
        let plan = RevealPlan::for_section(section, self.lightbox.catalog().len());
        let mut reveal = SectionReveal::new(plan);
        if let Some(batch) = reveal.on_mount(self.random.as_mut()) {
            self.pending_reveals.push(batch);
        }
        self.mounted.push(reveal);
    }

    fn unmount(&mut self, section: SectionId) {
        self.mounted.retain(|r| r.section() != section);
    }

    fn sync_keydown(&mut self) {
        if let Some(command) = self.keydown.sync(self.lightbox.is_open()) {
            self.pending_listeners.push(command);
        }
    }

    fn frame(&mut self, entered_content: bool, rejected: Vec<String>) -> Frame {
        let progress = self.view.progress().map(|p| ProgressReport {
            percent: p.percent(),
            display_percent: p.display_percent(),
            phase: p.phase(),
        });
        Frame {
            view: self.view.state(),
            progress,
            lightbox: self.lightbox.view(),
            evasive_offset: self.evasive.offset(),
            reveals: std::mem::take(&mut self.pending_reveals),
            listeners: std::mem::take(&mut self.pending_listeners),
            entered_content,
            rejected,
        }
    }
}
