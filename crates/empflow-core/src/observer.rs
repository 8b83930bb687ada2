use crate::scale::ScaleProfile;
use crate::tokens::ScaleTokens;
use crate::viewport::{Breakpoints, ContainerSize, Measurement, Viewport};

/// Keeps the current token set in sync with size-change signals.
///
/// Both signals feed the same recomputation: window resizes update the viewport, container
/// observations update the container box (e.g. layout reflow without a window resize). Each
/// handler returns `true` when the tokens changed and the template should re-render.
/// Redundant signals are harmless.
#[derive(Debug, Clone)]
pub struct ScaleObserver {
    profile: ScaleProfile,
    breakpoints: Breakpoints,
    container: Option<ContainerSize>,
    viewport: Option<Viewport>,
    tokens: ScaleTokens,
}

impl ScaleObserver {
    pub fn new(profile: ScaleProfile, breakpoints: Breakpoints) -> Self {
        Self {
            profile,
            breakpoints,
            container: None,
            viewport: None,
            tokens: ScaleTokens::default(),
        }
    }

    pub fn tokens(&self) -> &ScaleTokens {
        &self.tokens
    }

    /// The measurement the current tokens were derived from.
    ///
    /// Until a viewport has been observed, the container box doubles as the viewport.
    pub fn measurement(&self) -> Measurement {
        let viewport = self
            .viewport
            .or_else(|| {
                self.container
                    .map(|c| Viewport::new(c.width, c.height))
            })
            .unwrap_or_default();
        Measurement::new(self.container, viewport)
    }

    pub fn on_window_resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = Some(viewport);
        self.recompute("window-resize")
    }

    pub fn on_container_resize(&mut self, container: ContainerSize) -> bool {
        self.container = Some(container);
        self.recompute("container-resize")
    }

    /// Applies both signals at once (the initial layout pass).
    pub fn observe(&mut self, container: ContainerSize, viewport: Viewport) -> bool {
        self.container = Some(container);
        self.viewport = Some(viewport);
        self.recompute("observe")
    }

    fn recompute(&mut self, trigger: &'static str) -> bool {
        let next = self.profile.compute(&self.measurement(), &self.breakpoints);
        let changed = next != self.tokens;
        tracing::debug!(trigger, changed, measured = next.measured, "scale tokens refreshed");
        self.tokens = next;
        changed
    }
}

impl Default for ScaleObserver {
    fn default() -> Self {
        Self::new(ScaleProfile::default(), Breakpoints::default())
    }
}
