//! Render session lifecycle without any GPU state attached.

/// `Uninitialized → Initializing → Rendering → Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No GPU context yet.
    #[default]
    Uninitialized,
    /// GPU context and scene exist; waiting for the texture.
    Initializing,
    /// Texture bound; frames are drawn.
    Rendering,
    /// Torn down. Terminal.
    Disposed,
}

impl SessionPhase {
    /// GPU context became available. Only valid from `Uninitialized`.
    pub fn on_context_ready(self) -> Self {
        match self {
            SessionPhase::Uninitialized => SessionPhase::Initializing,
            other => other,
        }
    }

    /// Texture bound. Only valid from `Initializing`.
    pub fn on_texture_bound(self) -> Self {
        match self {
            SessionPhase::Initializing => SessionPhase::Rendering,
            other => other,
        }
    }

    pub fn on_dispose(self) -> Self {
        SessionPhase::Disposed
    }

    /// Frames requested in any other phase are skipped, not queued.
    pub fn should_draw(self) -> bool {
        self == SessionPhase::Rendering
    }

    pub fn has_context(self) -> bool {
        matches!(self, SessionPhase::Initializing | SessionPhase::Rendering)
    }
}
