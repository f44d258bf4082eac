#[cfg(test)]
#[path = "./deque_tests.rs"]
mod tests;

/// A double-ended queue backed by a power-of-two circular buffer.
///
/// Usable as a FIFO queue or a LIFO stack from either end. The backing
/// buffer doubles when full and can be shrunk back to its minimal
/// power-of-two size with [`compact`](Self::compact). Indexing uses a
/// bitmask, so the capacity is always a power of two and the buffer is
/// never kept completely full (one slot stays free to distinguish empty
/// from full).
///
/// This is the primitive behind the parser's peek queue, but it is
/// independent of parsing entirely.
pub struct Deque<T> {
    data: Box<[T]>,
    /// Index of the first element.
    head: usize,
    /// Index one past the last element.
    tail: usize,
    /// `data.len() - 1`; `x & mask == x % data.len()` since the length is
    /// a power of two.
    mask: usize,
}

const DEFAULT_CAPACITY: usize = 4;

impl<T: Copy + Default> Deque<T> {
    /// Creates an empty deque with a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque able to hold at least `capacity` elements
    /// before growing. The actual capacity is rounded up to a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(2).next_power_of_two();
        Deque {
            data: vec![T::default(); cap].into_boxed_slice(),
            head: 0,
            tail: 0,
            mask: cap - 1,
        }
    }

    /// Returns the number of queued elements.
    pub fn len(&self) -> usize {
        (self.tail.wrapping_sub(self.head)) & self.mask
    }

    /// Returns `true` if the deque holds no elements.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Removes every element without releasing the backing buffer.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Shrinks the backing buffer to the smallest power of two that holds
    /// the current elements (plus the one always-free slot).
    pub fn compact(&mut self) {
        let len = self.len();
        let cap = (len + 1).max(2).next_power_of_two();
        if cap == self.data.len() {
            return;
        }
        let mut data = vec![T::default(); cap].into_boxed_slice();
        for (i, slot) in data[..len].iter_mut().enumerate() {
            *slot = self.data[(self.head + i) & self.mask];
        }
        self.data = data;
        self.head = 0;
        self.tail = len;
        self.mask = cap - 1;
    }

    /// Inserts an element before the head.
    pub fn add_first(&mut self, element: T) {
        self.head = self.head.wrapping_sub(1) & self.mask;
        self.data[self.head] = element;
        if self.head == self.tail {
            self.grow();
        }
    }

    /// Inserts an element after the tail.
    pub fn add_last(&mut self, element: T) {
        self.data[self.tail] = element;
        self.tail = (self.tail + 1) & self.mask;
        if self.tail == self.head {
            self.grow();
        }
    }

    /// Returns the element at `index` (0 = head) without removing it.
    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        Some(self.data[(self.head + index) & self.mask])
    }

    /// Returns the head element without removing it.
    pub fn first(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.data[self.head])
        }
    }

    /// Returns the tail element without removing it.
    pub fn last(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.data[self.tail.wrapping_sub(1) & self.mask])
        }
    }

    /// Removes and returns the head element.
    pub fn remove_first(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let element = self.data[self.head];
        self.head = (self.head + 1) & self.mask;
        Some(element)
    }

    /// Removes and returns the tail element.
    pub fn remove_last(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = self.tail.wrapping_sub(1) & self.mask;
        Some(self.data[self.tail])
    }

    /// Doubles the backing buffer. Called when head meets tail, i.e. the
    /// buffer just became full.
    #[cold]
    fn grow(&mut self) {
        let old_cap = self.data.len();
        let new_cap = old_cap.checked_mul(2).expect("deque capacity overflow");
        let mut data = vec![T::default(); new_cap].into_boxed_slice();
        // The deque is full: old_cap elements starting at head.
        let first_part = old_cap - self.head;
        data[..first_part].copy_from_slice(&self.data[self.head..]);
        data[first_part..old_cap].copy_from_slice(&self.data[..self.head]);
        self.data = data;
        self.head = 0;
        self.tail = old_cap;
        self.mask = new_cap - 1;
    }
}

impl<T: Copy + Default> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + std::fmt::Debug> std::fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for i in 0..self.len() {
            list.entry(&self.get(i).unwrap());
        }
        list.finish()
    }
}
