use tracing::trace;

use crate::arbiter::{Arbiter, PendingInputs, Transfer};
use crate::error::SwitchError;
use crate::voq::VoqBuffer;

// ==========================================
// Round robin over the pending inputs of every output
// ==========================================
#[derive(Debug)]
pub struct StableMatching {
    num_ports: usize,
    pending: PendingInputs,
}

impl StableMatching {
    pub fn new(num_ports: usize) -> Self {
        Self {
            num_ports,
            pending: PendingInputs::new(num_ports),
        }
    }

    pub fn pending(&self) -> &PendingInputs {
        &self.pending
    }
}

impl Arbiter for StableMatching {
    fn name(&self) -> &'static str {
        "stable-matching"
    }

    fn num_ports(&self) -> usize {
        self.num_ports
    }

    fn on_enqueue(&mut self, input: usize, output: usize) {
        self.pending.mark(input, output);
    }

    fn arbitrate(&mut self, now: u64, buffer: &mut VoqBuffer) -> Result<Vec<Transfer>, SwitchError> {
        let mut input_taken = vec![false; self.num_ports];
        let mut commits = Vec::new();

        for output in 0..self.num_ports {
            let Some(candidate) = self.pending.front(output) else {
                continue;
            };
            if buffer.is_empty(candidate, output) {
                self.pending.pop(output);
                continue;
            }
            if input_taken[candidate] {
                // stays at the front for the next slot
                trace!("slot {now}: input {candidate} already matched, output {output} idles");
                continue;
            }
            self.pending.pop(output);
            input_taken[candidate] = true;
            commits.push((candidate, output));
        }

        let mut transfers = Vec::with_capacity(commits.len());
        for (input, output) in commits {
            let packet = buffer.dequeue_head(input, output)?;
            if !buffer.is_empty(input, output) {
                self.pending.mark(input, output);
            }
            transfers.push(Transfer {
                input,
                output,
                packet,
            });
        }
        Ok(transfers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{Arrival, Packet, PriorityClass};

    fn admit(arbiter: &mut StableMatching, buffer: &mut VoqBuffer, input: usize, output: usize) {
        let arrival = Arrival::new(input, output, PriorityClass::Medium);
        let seq = buffer.total_occupancy() as u64;
        assert!(buffer.enqueue(Packet::from_arrival(&arrival, 0, seq)).is_accepted());
        arbiter.on_enqueue(input, output);
    }

    #[test]
    fn serves_pending_inputs_in_turn() {
        let mut buffer = VoqBuffer::new(3, 8);
        let mut arbiter = StableMatching::new(3);
        admit(&mut arbiter, &mut buffer, 1, 0);
        admit(&mut arbiter, &mut buffer, 1, 0);
        admit(&mut arbiter, &mut buffer, 2, 0);

        let served: Vec<usize> = (0..3)
            .map(|t| {
                let transfers = arbiter.arbitrate(t, &mut buffer).unwrap();
                assert_eq!(transfers.len(), 1);
                transfers[0].input
            })
            .collect();
        // input 1 goes back to the tail after its first packet
        assert_eq!(served, vec![1, 2, 1]);
        assert_eq!(arbiter.pending().len(0), 0);
    }

    #[test]
    fn matched_input_blocks_second_output() {
        let mut buffer = VoqBuffer::new(2, 8);
        let mut arbiter = StableMatching::new(2);
        admit(&mut arbiter, &mut buffer, 0, 0);
        admit(&mut arbiter, &mut buffer, 0, 1);

        let transfers = arbiter.arbitrate(0, &mut buffer).unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!((transfers[0].input, transfers[0].output), (0, 0));
        // still waiting on output 1
        assert_eq!(arbiter.pending().front(1), Some(0));

        let transfers = arbiter.arbitrate(1, &mut buffer).unwrap();
        assert_eq!((transfers[0].input, transfers[0].output), (0, 1));
    }

    #[test]
    fn drained_pair_leaves_pending_set() {
        let mut buffer = VoqBuffer::new(2, 8);
        let mut arbiter = StableMatching::new(2);
        admit(&mut arbiter, &mut buffer, 1, 1);

        assert_eq!(arbiter.arbitrate(0, &mut buffer).unwrap().len(), 1);
        assert!(!arbiter.pending().contains(1, 1));
        assert!(arbiter.arbitrate(1, &mut buffer).unwrap().is_empty());
    }
}
