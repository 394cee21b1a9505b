use crate::decision_policy::Outcome;
use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Emit(Outcome),
    Dismiss,
}

/// Records every call so tests can inspect them.
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    calls: Mutex<Vec<DisplayCall>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DisplayCall::Emit(outcome) => Some(outcome),
                DisplayCall::Dismiss => None,
            })
            .collect()
    }

    fn record(&self, call: DisplayCall) {
        let _ = self.logger.info(&format!("{:?}", call));
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn emit(&self, outcome: &Outcome) {
        self.record(DisplayCall::Emit(outcome.clone()));
    }

    fn dismiss(&self) {
        self.record(DisplayCall::Dismiss);
    }
}
