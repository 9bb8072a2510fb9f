use tracing::{debug, trace};

use crate::arbiter::{Arbiter, Transfer};
use crate::config::SwitchConfig;
use crate::error::{ConfigError, SwitchError};
use crate::packet::{Arrival, Packet};
use crate::sink::{OutputQueues, OutputSink};
use crate::stats::SwitchStats;
use crate::voq::{Admission, VoqBuffer};

/// One crossbar connection made in a timeslot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub input: usize,
    pub output: usize,
}

// ==========================================
// Crossbar switch: VOQ buffer + arbiter + output sink + counters
// ==========================================
pub struct Switch<S = OutputQueues> {
    config: SwitchConfig,
    buffer: VoqBuffer,
    arbiter: Box<dyn Arbiter>,
    sink: S,
    stats: SwitchStats,
    next_seq: u64,
}

impl Switch<OutputQueues> {
    pub fn with_output_queues(
        config: SwitchConfig,
        arbiter: Box<dyn Arbiter>,
    ) -> Result<Self, SwitchError> {
        let sink = OutputQueues::new(config.num_ports);
        Self::new(config, arbiter, sink)
    }
}

impl<S: OutputSink> Switch<S> {
    pub fn new(config: SwitchConfig, arbiter: Box<dyn Arbiter>, sink: S) -> Result<Self, SwitchError> {
        config.validate()?;
        if arbiter.num_ports() != config.num_ports {
            return Err(ConfigError::ArbiterPorts {
                expected: config.num_ports,
                actual: arbiter.num_ports(),
            }
            .into());
        }
        Ok(Self {
            buffer: VoqBuffer::new(config.num_ports, config.buffer_size),
            stats: SwitchStats::new(config.num_ports),
            config,
            arbiter,
            sink,
            next_seq: 0,
        })
    }

    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    pub fn buffer(&self) -> &VoqBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> &SwitchStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn arbiter_name(&self) -> &'static str {
        self.arbiter.name()
    }

    /// Admits one arrival at slot `now`. A full VOQ drops the packet and is
    /// not an error; bad ports are.
    pub fn enqueue(&mut self, now: u64, arrival: &Arrival) -> Result<Admission, SwitchError> {
        self.buffer.check_port(arrival.input_port)?;
        self.buffer.check_port(arrival.output_port)?;

        let packet = Packet::from_arrival(arrival, now, self.next_seq);
        self.next_seq += 1;

        let (input, output) = (arrival.input_port, arrival.output_port);
        let admission = self.buffer.enqueue(packet);
        match &admission {
            Admission::Accepted => {
                self.stats
                    .record_accepted(input, self.buffer.occupancy(input, output));
                self.arbiter.on_enqueue(input, output);
            }
            Admission::Dropped(packet) => {
                self.stats.record_dropped();
                trace!("slot {now}: VOQ ({input}, {output}) full, dropped packet {}", packet.seq);
            }
        }
        Ok(admission)
    }

    /// Runs one arbitration pass and hands every transferred packet to the sink.
    pub fn run_timeslot(&mut self, now: u64) -> Result<Vec<Match>, SwitchError> {
        let transfers = self.arbiter.arbitrate(now, &mut self.buffer)?;

        let mut matches = Vec::with_capacity(transfers.len());
        for Transfer {
            input,
            output,
            packet,
        } in transfers
        {
            let waiting_time = now.saturating_sub(packet.arrival_time);
            let turnaround_time = waiting_time.saturating_add(packet.service_time);
            self.stats
                .record_transfer(output, waiting_time, packet.service_time);
            self.sink.push(output, packet, waiting_time, turnaround_time);
            matches.push(Match { input, output });
        }

        if !matches.is_empty() {
            debug!(
                "slot {now}: {} matched {} pairs, {} packets buffered",
                self.arbiter.name(),
                matches.len(),
                self.buffer.total_occupancy()
            );
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{Islip, StableMatching};
    use crate::packet::PriorityClass;

    fn islip_switch(num_ports: usize, buffer_size: usize) -> Switch {
        let config = SwitchConfig::default()
            .with_ports(num_ports)
            .with_buffer_size(buffer_size);
        Switch::with_output_queues(config, Box::new(Islip::new(num_ports))).unwrap()
    }

    #[test]
    fn rejects_out_of_range_ports() {
        let mut switch = islip_switch(2, 4);
        let err = switch
            .enqueue(0, &Arrival::new(0, 2, PriorityClass::Low))
            .unwrap_err();
        assert_eq!(err, SwitchError::PortOutOfRange { port: 2, num_ports: 2 });
        assert!(switch.enqueue(0, &Arrival::new(5, 0, PriorityClass::Low)).is_err());
        assert_eq!(switch.stats().total_arrivals, 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SwitchConfig::default().with_ports(0);
        assert!(Switch::with_output_queues(config, Box::new(Islip::new(0))).is_err());
    }

    #[test]
    fn rejects_arbiter_sized_for_other_port_count() {
        let config = SwitchConfig::default().with_ports(4);
        let err = Switch::with_output_queues(config.clone(), Box::new(StableMatching::new(2)))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SwitchError::Config(ConfigError::ArbiterPorts {
                expected: 4,
                actual: 2
            })
        );
        assert!(Switch::with_output_queues(config, Box::new(Islip::new(2))).is_err());
    }

    // hands the arbiter's pair to the buffer whether or not it holds a packet
    struct ForcedPair(usize, usize);

    impl Arbiter for ForcedPair {
        fn name(&self) -> &'static str {
            "forced-pair"
        }

        fn num_ports(&self) -> usize {
            2
        }

        fn arbitrate(&mut self, _now: u64, buffer: &mut VoqBuffer) -> Result<Vec<Transfer>, SwitchError> {
            let packet = buffer.dequeue_head(self.0, self.1)?;
            Ok(vec![Transfer {
                input: self.0,
                output: self.1,
                packet,
            }])
        }
    }

    #[test]
    fn dequeue_from_empty_voq_fails_the_slot() {
        let config = SwitchConfig::default().with_ports(2);
        let mut switch =
            Switch::with_output_queues(config, Box::new(ForcedPair(1, 0))).unwrap();
        switch.enqueue(0, &Arrival::new(0, 1, PriorityClass::Low)).unwrap();

        assert_eq!(
            switch.run_timeslot(0),
            Err(SwitchError::EmptyQueue {
                input: 1,
                output: 0
            })
        );
        assert_eq!(switch.stats().packets_processed, 0);
        assert_eq!(switch.sink().total(), 0);
    }

    #[test]
    fn huge_service_time_does_not_overflow() {
        let mut switch = islip_switch(1, 4);
        let arrival = Arrival::new(0, 0, PriorityClass::Low).with_service_time(u64::MAX);
        switch.enqueue(0, &arrival).unwrap();

        switch.run_timeslot(3).unwrap();
        assert_eq!(switch.stats().total_turnaround_time, u64::MAX);
    }

    #[test]
    fn transfer_records_waiting_and_turnaround() {
        let mut switch = islip_switch(2, 4);
        let arrival = Arrival::new(1, 0, PriorityClass::High).with_service_time(6);
        switch.enqueue(3, &arrival).unwrap();

        let matches = switch.run_timeslot(7).unwrap();
        assert_eq!(matches, vec![Match { input: 1, output: 0 }]);

        let stats = switch.stats();
        assert_eq!(stats.packets_processed, 1);
        assert_eq!(stats.total_waiting_time, 4);
        assert_eq!(stats.total_turnaround_time, 10);
        assert_eq!(stats.queue_throughput, vec![1, 0]);
        assert_eq!(switch.sink().len(0), 1);
    }

    #[test]
    fn high_priority_leaves_first() {
        let mut switch = islip_switch(1, 8);
        switch.enqueue(0, &Arrival::new(0, 0, PriorityClass::Low)).unwrap();
        switch.enqueue(0, &Arrival::new(0, 0, PriorityClass::High)).unwrap();
        switch.enqueue(0, &Arrival::new(0, 0, PriorityClass::High)).unwrap();

        for t in 0..3 {
            switch.run_timeslot(t).unwrap();
        }
        let order: Vec<(PriorityClass, u64)> = switch
            .sink()
            .queue(0)
            .unwrap()
            .iter()
            .map(|p| (p.priority, p.seq))
            .collect();
        assert_eq!(
            order,
            vec![
                (PriorityClass::High, 1),
                (PriorityClass::High, 2),
                (PriorityClass::Low, 0)
            ]
        );
    }

    #[test]
    fn accepted_arrivals_reach_the_arbiter() {
        let config = SwitchConfig::default().with_ports(2);
        let mut switch =
            Switch::with_output_queues(config, Box::new(StableMatching::new(2))).unwrap();
        switch.enqueue(0, &Arrival::new(1, 1, PriorityClass::Low)).unwrap();

        assert_eq!(switch.run_timeslot(0).unwrap(), vec![Match { input: 1, output: 1 }]);
        assert_eq!(switch.arbiter_name(), "stable-matching");
    }
}
