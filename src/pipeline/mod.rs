mod executor;
pub mod fsm;

pub use executor::{PredictionOutcome, PredictionResult, Predictor, round2};
pub use fsm::{RequestEvent, RequestState, RequestStateMachine};
