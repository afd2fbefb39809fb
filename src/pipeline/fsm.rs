use crate::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Validating,
    Predicting,
    Done,
    Rejected,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    InputAccepted,
    InputRejected,
    PredictionCompleted,
    PredictionFailed,
}

/// Lifecycle of a single prediction request.
pub struct RequestStateMachine {
    request_id: String,
    state: RequestState,
}

impl RequestStateMachine {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            state: RequestState::Validating,
        }
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn transition(&mut self, event: RequestEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (RequestState::Validating, RequestEvent::InputAccepted) => RequestState::Predicting,
            (RequestState::Validating, RequestEvent::InputRejected) => RequestState::Rejected,
            (RequestState::Predicting, RequestEvent::PredictionCompleted) => RequestState::Done,
            (RequestState::Predicting, RequestEvent::PredictionFailed) => RequestState::Failed,
            _ => {
                warn!(
                    request_id = %self.request_id,
                    "Invalid request transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::fsm(format!(
                    "Invalid transition from {:?} with event {:?}",
                    self.state, event
                )));
            }
        };

        debug!(
            request_id = %self.request_id,
            "Request state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_happy_path() {
        let mut fsm = RequestStateMachine::new("req-1");
        assert_eq!(fsm.current_state(), RequestState::Validating);

        fsm.transition(RequestEvent::InputAccepted).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Predicting);

        fsm.transition(RequestEvent::PredictionCompleted).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Done);
    }

    #[test]
    fn test_rejection_is_final() {
        let mut fsm = RequestStateMachine::new("req-2");
        fsm.transition(RequestEvent::InputRejected).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Rejected);
        assert!(fsm.transition(RequestEvent::InputAccepted).is_err());
    }

    #[test]
    fn test_cannot_predict_before_validation() {
        let mut fsm = RequestStateMachine::new("req-3");
        let err = fsm.transition(RequestEvent::PredictionCompleted).unwrap_err();
        assert!(matches!(err, Error::Fsm(_)));
        assert_eq!(fsm.current_state(), RequestState::Validating);
    }

    #[test]
    fn test_failure_from_predicting() {
        let mut fsm = RequestStateMachine::new("req-4");
        fsm.transition(RequestEvent::InputAccepted).unwrap();
        fsm.transition(RequestEvent::PredictionFailed).unwrap();
        assert_eq!(fsm.current_state(), RequestState::Failed);
    }
}
