use crate::error::SwitchError;
use crate::packet::{NUM_CLASSES, Packet};
use crate::voq::ClassVoq;

#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Dropped(Packet),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

// ==========================================
// VOQ buffer manager
// Arena of num_ports * num_ports queues, addressed by input * num_ports + output
// ==========================================
#[derive(Debug)]
pub struct VoqBuffer {
    num_ports: usize,
    capacity: usize,
    voqs: Vec<ClassVoq>,
    resident: usize,
}

impl VoqBuffer {
    pub fn new(num_ports: usize, capacity: usize) -> Self {
        Self {
            num_ports,
            capacity,
            voqs: (0..num_ports * num_ports).map(|_| ClassVoq::new()).collect(),
            resident: 0,
        }
    }

    pub fn num_ports(&self) -> usize {
        self.num_ports
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn slot(&self, input: usize, output: usize) -> usize {
        debug_assert!(input < self.num_ports && output < self.num_ports);
        input * self.num_ports + output
    }

    pub fn check_port(&self, port: usize) -> Result<(), SwitchError> {
        if port < self.num_ports {
            Ok(())
        } else {
            Err(SwitchError::PortOutOfRange {
                port,
                num_ports: self.num_ports,
            })
        }
    }

    pub fn enqueue(&mut self, packet: Packet) -> Admission {
        let slot = self.slot(packet.input_port, packet.output_port);
        let voq = &mut self.voqs[slot];
        if voq.len() >= self.capacity {
            return Admission::Dropped(packet);
        }
        voq.push(packet);
        self.resident += 1;
        Admission::Accepted
    }

    /// Head-of-line packet by priority order.
    pub fn dequeue_head(&mut self, input: usize, output: usize) -> Result<Packet, SwitchError> {
        let slot = self.slot(input, output);
        let packet = self.voqs[slot]
            .pop_head()
            .ok_or(SwitchError::EmptyQueue { input, output })?;
        self.resident -= 1;
        Ok(packet)
    }

    pub fn dequeue_class(
        &mut self,
        input: usize,
        output: usize,
        class: usize,
    ) -> Result<Packet, SwitchError> {
        let slot = self.slot(input, output);
        let packet = self.voqs[slot]
            .pop_class(class)
            .ok_or(SwitchError::EmptyQueue { input, output })?;
        self.resident -= 1;
        Ok(packet)
    }

    pub fn peek_class(&self, input: usize, output: usize, class: usize) -> Option<&Packet> {
        self.voqs[self.slot(input, output)].peek_class(class)
    }

    /// Probes `start`, `start + 2`, `start + 1` (mod 3) and returns the first
    /// class holding a packet.
    pub fn first_nonempty_class(&self, input: usize, output: usize, start: usize) -> Option<usize> {
        let voq = &self.voqs[self.slot(input, output)];
        let mut class = start % NUM_CLASSES;
        for _ in 0..NUM_CLASSES {
            if voq.class_len(class) > 0 {
                return Some(class);
            }
            class = (class + 2) % NUM_CLASSES;
        }
        None
    }

    pub fn occupancy(&self, input: usize, output: usize) -> usize {
        self.voqs[self.slot(input, output)].len()
    }

    pub fn is_empty(&self, input: usize, output: usize) -> bool {
        self.occupancy(input, output) == 0
    }

    pub fn total_occupancy(&self) -> usize {
        self.resident
    }

    /// Request matrix of the current slot, row-major by input.
    pub fn requests(&self) -> Vec<bool> {
        self.voqs.iter().map(|voq| !voq.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{Arrival, PriorityClass};

    fn pkt(input: usize, output: usize, priority: PriorityClass, seq: u64) -> Packet {
        Packet::from_arrival(&Arrival::new(input, output, priority), 0, seq)
    }

    #[test]
    fn enqueue_respects_capacity() {
        let mut buffer = VoqBuffer::new(2, 2);
        assert!(buffer.enqueue(pkt(0, 1, PriorityClass::Low, 0)).is_accepted());
        assert!(buffer.enqueue(pkt(0, 1, PriorityClass::High, 1)).is_accepted());

        match buffer.enqueue(pkt(0, 1, PriorityClass::High, 2)) {
            Admission::Dropped(p) => assert_eq!(p.seq, 2),
            Admission::Accepted => panic!("buffer should be full"),
        }
        // other pairs are independent
        assert!(buffer.enqueue(pkt(1, 1, PriorityClass::Low, 3)).is_accepted());

        assert_eq!(buffer.occupancy(0, 1), 2);
        assert_eq!(buffer.occupancy(1, 1), 1);
        assert_eq!(buffer.total_occupancy(), 3);
    }

    #[test]
    fn dequeue_empty_is_an_error() {
        let mut buffer = VoqBuffer::new(2, 4);
        assert_eq!(
            buffer.dequeue_head(1, 0),
            Err(SwitchError::EmptyQueue { input: 1, output: 0 })
        );
        assert!(buffer.dequeue_class(0, 0, 2).is_err());
    }

    #[test]
    fn dequeue_updates_occupancy() {
        let mut buffer = VoqBuffer::new(2, 4);
        buffer.enqueue(pkt(1, 0, PriorityClass::Low, 0));
        buffer.enqueue(pkt(1, 0, PriorityClass::High, 1));

        assert_eq!(buffer.dequeue_head(1, 0).map(|p| p.seq), Ok(1));
        assert_eq!(buffer.occupancy(1, 0), 1);
        assert_eq!(buffer.dequeue_class(1, 0, 0).map(|p| p.seq), Ok(0));
        assert!(buffer.is_empty(1, 0));
        assert_eq!(buffer.total_occupancy(), 0);
    }

    #[test]
    fn class_probe_order() {
        let mut buffer = VoqBuffer::new(1, 8);
        buffer.enqueue(pkt(0, 0, PriorityClass::Low, 0));
        buffer.enqueue(pkt(0, 0, PriorityClass::Medium, 1));

        // 2 is empty, next probe is 1
        assert_eq!(buffer.first_nonempty_class(0, 0, 2), Some(1));
        // 0 -> 2 -> 1
        assert_eq!(buffer.first_nonempty_class(0, 0, 0), Some(0));
        buffer.dequeue_class(0, 0, 0).unwrap();
        assert_eq!(buffer.first_nonempty_class(0, 0, 0), Some(1));
        buffer.dequeue_class(0, 0, 1).unwrap();
        assert_eq!(buffer.first_nonempty_class(0, 0, 0), None);
    }

    #[test]
    fn request_matrix() {
        let mut buffer = VoqBuffer::new(2, 4);
        buffer.enqueue(pkt(1, 0, PriorityClass::Low, 0));
        assert_eq!(buffer.requests(), vec![false, false, true, false]);
        assert!(buffer.check_port(1).is_ok());
        assert!(buffer.check_port(2).is_err());
    }
}
