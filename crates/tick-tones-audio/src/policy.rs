/// Which checkbox transition a cue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// Checkbox became checked.
    Tick,
    /// Checkbox became unchecked.
    Untick,
}

impl CueKind {
    pub fn label(self) -> &'static str {
        match self {
            CueKind::Tick => "tick",
            CueKind::Untick => "untick",
        }
    }
}

/// Playback settings for one cue kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePolicy {
    pub enabled: bool,
    /// Sound played when random mode is off.
    pub sound: String,
    /// Volume (0.0 - 1.0), validated by the settings owner.
    pub volume: f32,
    pub random: bool,
    /// Candidates drawn from when random mode is on.
    pub candidates: Vec<String>,
}

/// Snapshot of both cue policies, read once per play request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackPolicy {
    pub tick: CuePolicy,
    pub untick: CuePolicy,
}

impl PlaybackPolicy {
    pub fn cue(&self, kind: CueKind) -> &CuePolicy {
        match kind {
            CueKind::Tick => &self.tick,
            CueKind::Untick => &self.untick,
        }
    }
}
