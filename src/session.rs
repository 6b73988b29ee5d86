//! Per-source state and the player-facing controller.
//!
//! A [`Session`] holds the cues of one loaded source and is never patched in
//! place: a new source produces a new session once its text arrives, and
//! detaching drops it.

use crate::cue::CueEntry;
use crate::error::{FetchError, ParseWarning};
use crate::fetch::CueFetcher;
use crate::locator::{RenderInstruction, ThumbnailLocator};
use crate::parser::CueParser;
use crate::paths::resolve_source;
use crate::preload::PreloadTracker;
use crate::render::RenderPort;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cues parsed from one source
#[derive(Debug, Clone)]
pub struct Session {
    source: String,
    entries: Vec<CueEntry>,
    warnings: Vec<ParseWarning>,
    last_rendered: Option<usize>,
}

impl Session {
    pub fn new(
        source: impl Into<String>,
        entries: Vec<CueEntry>,
        warnings: Vec<ParseWarning>,
    ) -> Self {
        Self {
            source: source.into(),
            entries,
            warnings,
            last_rendered: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entries(&self) -> &[CueEntry] {
        &self.entries
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Index of the entry whose region is currently applied
    pub fn last_rendered(&self) -> Option<usize> {
        self.last_rendered
    }

    pub fn locate<'a>(
        &'a self,
        locator: &ThumbnailLocator,
        fraction: f64,
        bar_width_px: f64,
        duration_seconds: f64,
    ) -> Option<RenderInstruction<'a>> {
        locator.locate(fraction, bar_width_px, duration_seconds, &self.entries)
    }
}

/// Plugin options supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Cue file location, possibly relative to `page_url`
    pub src: Option<String>,
    /// Keep the player's own time tooltip visible
    pub show_timestamp: bool,
    /// Location of the hosting page
    pub page_url: String,
}

/// Handle for one in-flight cue fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    url: String,
    source: String,
}

impl LoadTicket {
    /// Fully qualified URL to fetch
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Source as given by the host
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Unloaded,
    Loading,
    Ready,
}

/// Drives a [`RenderPort`] from pointer events over the progress bar
pub struct ThumbnailController<P: RenderPort> {
    options: Options,
    locator: ThumbnailLocator,
    port: P,
    session: Option<Session>,
    pending: Option<LoadTicket>,
    next_generation: u64,
    visible: bool,
}

impl<P: RenderPort> ThumbnailController<P> {
    pub fn new(options: Options, preload: Arc<PreloadTracker>, port: P) -> Self {
        Self {
            options,
            locator: ThumbnailLocator::new(preload),
            port,
            session: None,
            pending: None,
            next_generation: 0,
            visible: false,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        match (&self.pending, &self.session) {
            (Some(_), _) => ControllerState::Loading,
            (None, Some(_)) => ControllerState::Ready,
            (None, None) => ControllerState::Unloaded,
        }
    }

    /// Start loading the source already configured in the options.
    pub fn initialize(&mut self) -> Option<LoadTicket> {
        let src = self.options.src.clone()?;
        self.issue_ticket(src)
    }

    /// Switch to a new source. The current session stays in place until the
    /// returned ticket completes. An empty source clears everything.
    pub fn set_source(&mut self, src: impl Into<String>) -> Option<LoadTicket> {
        let src = src.into();
        if src.trim().is_empty() {
            self.options.src = None;
            self.detach();
            return None;
        }
        self.options.src = Some(src.clone());
        self.issue_ticket(src)
    }

    fn issue_ticket(&mut self, src: String) -> Option<LoadTicket> {
        self.next_generation += 1;
        let ticket = LoadTicket {
            generation: self.next_generation,
            url: resolve_source(&src, &self.options.page_url),
            source: src,
        };
        debug!(url = ticket.url(), generation = ticket.generation, "loading cues");
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }

    /// Commit fetched cue text. Returns `false` if the ticket was superseded
    /// or cancelled and the text was ignored.
    pub fn complete_load(&mut self, ticket: &LoadTicket, text: &str) -> bool {
        if !self.is_current(ticket) {
            debug!(url = ticket.url(), "ignoring stale cue load");
            return false;
        }
        self.pending = None;

        let parsed = CueParser::for_source(ticket.source(), &self.options.page_url).parse(text);
        info!(
            url = ticket.url(),
            cues = parsed.entries.len(),
            warnings = parsed.warnings.len(),
            "thumbnail cues loaded"
        );

        self.reset_display();
        self.session = Some(Session::new(ticket.url(), parsed.entries, parsed.warnings));
        self.port.set_time_tooltip_visible(self.options.show_timestamp);
        true
    }

    /// Record a failed fetch. Thumbnails stay off for this source.
    pub fn fail_load(&mut self, ticket: &LoadTicket, error: &FetchError) -> bool {
        if !self.is_current(ticket) {
            debug!(url = ticket.url(), "ignoring stale cue load failure");
            return false;
        }
        warn!(url = ticket.url(), %error, "thumbnail cues unavailable");
        self.pending = None;
        self.reset_display();
        self.session = None;
        true
    }

    /// Fetch and commit the configured source in one step.
    pub fn load(&mut self, fetcher: &dyn CueFetcher) -> Result<(), FetchError> {
        let Some(ticket) = self.initialize() else {
            return Ok(());
        };
        match fetcher.fetch(ticket.url()) {
            Ok(text) => {
                self.complete_load(&ticket, &text);
                Ok(())
            }
            Err(error) => {
                self.fail_load(&ticket, &error);
                Err(error)
            }
        }
    }

    /// Drop all cue state and hide the thumbnail.
    pub fn detach(&mut self) {
        self.session = None;
        self.pending = None;
        self.reset_display();
    }

    fn reset_display(&mut self) {
        self.port.hide();
        self.visible = false;
    }

    pub fn pointer_enter(&mut self) {
        if self.session.is_some() {
            self.port.show();
            self.visible = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.reset_display();
    }

    /// Update the thumbnail for a pointer at `fraction` along the bar.
    /// Returns the instruction that was rendered, or `None` when hidden.
    pub fn pointer_move(
        &mut self,
        fraction: f64,
        bar_width_px: f64,
        duration_seconds: f64,
    ) -> Option<RenderInstruction<'_>> {
        let session = self.session.as_mut()?;

        let Some(found) = self
            .locator
            .locate(fraction, bar_width_px, duration_seconds, &session.entries)
        else {
            self.port.hide();
            self.visible = false;
            return None;
        };

        if !self.visible {
            self.port.show();
            self.visible = true;
        }

        if session.last_rendered == Some(found.index) {
            self.port.apply_offset(found.offset_px);
        } else {
            self.port.apply_region(found.region(), found.offset_px);
            session.last_rendered = Some(found.index);
        }
        Some(found)
    }
}
