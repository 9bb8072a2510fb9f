use std::collections::BTreeMap;

use crate::packet::Arrival;
use crate::traffic::TrafficSource;

/// Fixed arrival lists keyed by timeslot.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTraffic {
    script: BTreeMap<u64, Vec<Arrival>>,
}

impl ScriptedTraffic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, slot: u64, arrival: Arrival) -> Self {
        self.push(slot, arrival);
        self
    }

    pub fn push(&mut self, slot: u64, arrival: Arrival) {
        self.script.entry(slot).or_default().push(arrival);
    }
}

impl TrafficSource for ScriptedTraffic {
    fn arrivals(&mut self, now: u64) -> Vec<Arrival> {
        self.script.remove(&now).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::PriorityClass;

    #[test]
    fn replays_by_slot() {
        let a = Arrival::new(0, 1, PriorityClass::Low);
        let b = Arrival::new(1, 0, PriorityClass::High);
        let mut source = ScriptedTraffic::new().at(2, a).at(2, b).at(5, a);

        assert!(source.arrivals(0).is_empty());
        assert_eq!(source.arrivals(2), vec![a, b]);
        assert_eq!(source.arrivals(5), vec![a]);
        assert!(source.arrivals(5).is_empty());
    }
}
