/// Analysis session state machine
mod analysis_session;

pub use analysis_session::{AnalysisSession, SessionResult, SessionState};
