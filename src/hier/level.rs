use std::collections::HashMap;

/// Upper bound on up-front allocation; larger levels grow on demand.
const PREALLOC_LINES: usize = 4096;

#[derive(Debug, Clone, Copy)]
struct Node {
    addr: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A fully-associative cache tier with LRU replacement.
///
/// Residency is a doubly linked recency list threaded through `nodes`, with
/// `index` mapping a line address to its slot. `head` is the least recently
/// used line (next victim), `tail` the most recently used. Slots are never
/// freed individually: an eviction hands the victim's slot straight to the
/// incoming line, so `nodes.len()` never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct CacheLevel {
    name: String,
    capacity: usize,
    latency: u64,
    index: HashMap<u64, usize>,
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl CacheLevel {
    pub fn new(name: &str, capacity: usize, latency: u64) -> Self {
        let reserve = capacity.min(PREALLOC_LINES);
        Self {
            name: name.to_string(),
            capacity,
            latency,
            index: HashMap::with_capacity(reserve),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latency(&self) -> u64 {
        self.latency
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, addr: u64) -> bool {
        self.index.contains_key(&addr)
    }

    /// Least recently used line, i.e. the next eviction victim.
    pub fn lru(&self) -> Option<u64> {
        self.head.map(|idx| self.nodes[idx].addr)
    }

    pub fn mru(&self) -> Option<u64> {
        self.tail.map(|idx| self.nodes[idx].addr)
    }

    /// Resident lines from least to most recently used.
    pub fn resident(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            out.push(self.nodes[idx].addr);
            cursor = self.nodes[idx].next;
        }
        out
    }

    /// Marks `addr` as most recently used. Returns false if it is not resident.
    pub fn touch(&mut self, addr: u64) -> bool {
        let Some(&idx) = self.index.get(&addr) else {
            debug_assert!(false, "touch on non-resident line {:#x} in {}", addr, self.name);
            return false;
        };
        if self.tail != Some(idx) {
            self.unlink(idx);
            self.push_back(idx);
        }
        true
    }

    /// Inserts `addr` as most recently used, evicting the LRU line first when
    /// the level is full. Returns the evicted line, if any. A zero-capacity
    /// level retains nothing.
    pub fn insert(&mut self, addr: u64) -> Option<u64> {
        if self.contains(addr) {
            debug_assert!(false, "insert of resident line {:#x} in {}", addr, self.name);
            self.touch(addr);
            return None;
        }
        if self.capacity == 0 {
            return None;
        }

        if self.nodes.len() < self.capacity {
            let idx = self.nodes.len();
            self.nodes.push(Node {
                addr,
                prev: None,
                next: None,
            });
            self.index.insert(addr, idx);
            self.push_back(idx);
            return None;
        }

        // full: recycle the victim's slot for the incoming line
        let victim = self.head?;
        self.unlink(victim);
        let evicted = self.nodes[victim].addr;
        self.index.remove(&evicted);
        self.nodes[victim].addr = addr;
        self.index.insert(addr, victim);
        self.push_back(victim);
        Some(evicted)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn unlink(&mut self, idx: usize) {
        let Node { prev, next, .. } = self.nodes[idx];
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    fn push_back(&mut self, idx: usize) {
        self.nodes[idx].prev = self.tail;
        self.nodes[idx].next = None;
        match self.tail {
            Some(t) => self.nodes[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}
