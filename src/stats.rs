use chrono::Local;

// ==========================================
// Switch-wide counters
// Per-port vectors: throughput is indexed by output, occupancy by input
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchStats {
    pub packets_processed: u64,
    pub total_packets_dropped: u64,
    pub total_arrivals: u64,
    pub total_enqueued: u64,
    pub total_waiting_time: u64,
    pub total_turnaround_time: u64,
    pub queue_throughput: Vec<u64>,
    pub total_buffer_occupancy: Vec<u64>,
    pub time_units: Vec<u64>,
}

impl SwitchStats {
    pub fn new(num_ports: usize) -> Self {
        Self {
            queue_throughput: vec![0; num_ports],
            total_buffer_occupancy: vec![0; num_ports],
            time_units: vec![0; num_ports],
            ..Default::default()
        }
    }

    pub(crate) fn record_accepted(&mut self, input: usize, occupancy: usize) {
        self.total_arrivals = self.total_arrivals.saturating_add(1);
        self.total_enqueued = self.total_enqueued.saturating_add(1);
        self.total_buffer_occupancy[input] =
            self.total_buffer_occupancy[input].saturating_add(occupancy as u64);
        self.time_units[input] = self.time_units[input].saturating_add(1);
    }

    pub(crate) fn record_dropped(&mut self) {
        self.total_arrivals = self.total_arrivals.saturating_add(1);
        self.total_packets_dropped = self.total_packets_dropped.saturating_add(1);
    }

    pub(crate) fn record_transfer(&mut self, output: usize, waiting_time: u64, service_time: u64) {
        self.packets_processed = self.packets_processed.saturating_add(1);
        self.queue_throughput[output] = self.queue_throughput[output].saturating_add(1);
        self.total_waiting_time = self.total_waiting_time.saturating_add(waiting_time);
        self.total_turnaround_time = self
            .total_turnaround_time
            .saturating_add(waiting_time.saturating_add(service_time));
    }

    pub fn average_waiting_time(&self) -> f64 {
        ratio(self.total_waiting_time, self.packets_processed)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        ratio(self.total_turnaround_time, self.packets_processed)
    }

    /// Percentage of arrivals that found their VOQ full.
    pub fn drop_rate(&self) -> f64 {
        ratio(self.total_packets_dropped, self.total_arrivals) * 100.0
    }

    pub fn average_occupancy(&self, port: usize) -> f64 {
        match (self.total_buffer_occupancy.get(port), self.time_units.get(port)) {
            (Some(&total), Some(&units)) => ratio(total, units),
            _ => 0.0,
        }
    }

    pub fn print_report(&self, name: &str, sim_time: u64) {
        let now_str = Local::now().format("%H:%M:%S").to_string();

        println!("\n[{}] Switch report: {}", now_str, name);
        println!("Simulation time: {} units", sim_time);
        println!("-------------------------------------------------------------");
        println!(
            "{:<6} | {:<18} | {:<22}",
            "Port", "Throughput (pkts)", "Avg occupancy (pkts)"
        );
        println!("-------------------------------------------------------------");
        for port in 0..self.queue_throughput.len() {
            println!(
                "{:<6} | {:<18} | {:<22.3}",
                port,
                self.queue_throughput[port],
                self.average_occupancy(port)
            );
        }
        println!("-------------------------------------------------------------");
        println!("Packets processed:       {}", self.packets_processed);
        println!("Average turnaround time: {:.3} units", self.average_turnaround_time());
        println!("Average waiting time:    {:.3} units", self.average_waiting_time());
        println!("Packets dropped:         {}", self.total_packets_dropped);
        println!("Drop rate:               {:.3}%", self.drop_rate());
        println!("=============================================================\n");
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
