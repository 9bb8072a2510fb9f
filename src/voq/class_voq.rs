use std::collections::VecDeque;

use crate::packet::{NUM_CLASSES, Packet};

// ==========================================
// One virtual output queue: three class FIFOs
// ==========================================
#[derive(Debug, Default)]
pub struct ClassVoq {
    classes: [VecDeque<Packet>; NUM_CLASSES],
    len: usize,
}

impl ClassVoq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, packet: Packet) {
        self.classes[packet.class_index()].push_back(packet);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn class_len(&self, class: usize) -> usize {
        self.classes[class].len()
    }

    /// Highest non-empty class, FIFO inside the class.
    #[cfg(test)]
    pub fn peek_head(&self) -> Option<&Packet> {
        self.classes.iter().rev().find_map(|q| q.front())
    }

    pub fn peek_class(&self, class: usize) -> Option<&Packet> {
        self.classes.get(class)?.front()
    }

    pub fn pop_head(&mut self) -> Option<Packet> {
        let class = (0..NUM_CLASSES)
            .rev()
            .find(|&c| !self.classes[c].is_empty())?;
        self.pop_class(class)
    }

    pub fn pop_class(&mut self, class: usize) -> Option<Packet> {
        let packet = self.classes.get_mut(class)?.pop_front()?;
        self.len -= 1;
        Some(packet)
    }
}
