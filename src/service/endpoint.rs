#[derive(Debug, Clone, Copy)]
pub enum RoundEndpoint {
    StartSession,
    PlayRound,
    EndSession,
}

impl RoundEndpoint {
    pub fn path(&self) -> &str {
        match self {
            Self::StartSession => "/session/start",
            Self::PlayRound => "/play/round",
            Self::EndSession => "/session/end",
        }
    }
}
