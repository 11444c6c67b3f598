/// Result of a single status query: the state label plus whatever the query
/// read alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot<P> {
    pub state: String,
    pub payload: Option<P>,
}

impl<P> StatusSnapshot<P> {
    pub fn new(state: impl Into<String>, payload: P) -> Self {
        Self {
            state: state.into(),
            payload: Some(payload),
        }
    }

    pub fn state_only(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            payload: None,
        }
    }

    pub fn is_in(&self, states: &[String]) -> bool {
        states.iter().any(|s| s == &self.state)
    }

    pub fn into_payload(self) -> Option<P> {
        self.payload
    }
}
