use std::sync::Mutex;

use super::{Emission, PresentationSink};

/// Keeps every emission in arrival order.
#[derive(Default)]
pub struct RecordingSink {
    emissions: Mutex<Vec<Emission>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Emission> {
        self.emissions.lock().unwrap().last().cloned()
    }
}

impl PresentationSink for RecordingSink {
    fn render(&self, emission: Emission) {
        self.emissions.lock().unwrap().push(emission);
    }
}
