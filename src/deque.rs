//! Growable double-ended queue of chars.
//!
//! [`CharDeque`] is the working storage behind [`LookaheadInput`](crate::LookaheadInput):
//! peeked characters are appended at the back, pushed-back characters are
//! inserted at the front.
//!
//! The backing array is used as a ring. Its capacity is always a power of two
//! so that `index & mask` replaces `index % capacity`, and it is never kept
//! completely full, which makes `head == tail` mean "empty" without a separate
//! counter.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::CharDeque;
//!
//! let mut deque = CharDeque::new();
//! deque.push_back('b');
//! deque.push_front('a');
//! deque.extend_back(&['c', 'd']);
//!
//! assert_eq!(deque.len(), 4);
//! assert_eq!(deque.pop_front(), Ok('a'));
//! assert_eq!(deque.drain_all(), "bcd");
//! assert!(deque.is_empty());
//! ```

use crate::error::BufferError;
use std::fmt;

const DEFAULT_CAPACITY: usize = 4;

/// A double-ended queue of chars backed by a power-of-two ring buffer.
///
/// Usable as a FIFO queue (`push_back` + `pop_front`) and as a LIFO stack
/// (`push_front` + `pop_front`).
#[derive(Clone)]
pub struct CharDeque {
    data: Box<[char]>,
    /// Position of the first element.
    head: usize,
    /// Position just after the last element.
    tail: usize,
    /// `capacity - 1`
    mask: usize,
}

impl CharDeque {
    /// Creates an empty deque with a capacity of 4.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty deque. The capacity is rounded up to a power of two,
    /// and a capacity of 0 becomes 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::CharDeque;
    ///
    /// assert_eq!(CharDeque::with_capacity(5).capacity(), 8);
    /// assert_eq!(CharDeque::with_capacity(0).capacity(), 1);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        CharDeque {
            data: vec!['\0'; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            mask: capacity - 1,
        }
    }

    /// Returns the number of chars in the deque.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tail.wrapping_sub(self.head) & self.mask
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns the size of the backing array.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Removes every char without touching the capacity.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Inserts a char before the first one.
    pub fn push_front(&mut self, c: char) {
        self.head = self.head.wrapping_sub(1) & self.mask;
        self.data[self.head] = c;
        if self.head == self.tail {
            self.grow_full();
        }
    }

    /// Inserts a char after the last one.
    pub fn push_back(&mut self, c: char) {
        self.data[self.tail] = c;
        self.tail = (self.tail + 1) & self.mask;
        if self.tail == self.head {
            self.grow_full();
        }
    }

    /// Inserts `chars` before the first char, keeping their order: `chars[0]`
    /// becomes the new front.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::CharDeque;
    ///
    /// let mut deque = CharDeque::new();
    /// deque.push_back('c');
    /// deque.extend_front(&['a', 'b']);
    /// assert_eq!(deque.drain_all(), "abc");
    /// ```
    pub fn extend_front(&mut self, chars: &[char]) {
        self.reserve(chars.len());
        for &c in chars.iter().rev() {
            self.head = self.head.wrapping_sub(1) & self.mask;
            self.data[self.head] = c;
        }
    }

    /// Inserts `chars` after the last char.
    pub fn extend_back(&mut self, chars: &[char]) {
        self.reserve(chars.len());
        for &c in chars {
            self.data[self.tail] = c;
            self.tail = (self.tail + 1) & self.mask;
        }
    }

    /// Removes and returns the first char.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Empty`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<char, BufferError> {
        if self.is_empty() {
            return Err(BufferError::Empty);
        }
        let c = self.data[self.head];
        self.head = (self.head + 1) & self.mask;
        Ok(c)
    }

    /// Removes and returns the last char.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Empty`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<char, BufferError> {
        if self.is_empty() {
            return Err(BufferError::Empty);
        }
        self.tail = self.tail.wrapping_sub(1) & self.mask;
        Ok(self.data[self.tail])
    }

    /// Returns the char at `index`, counted from the front, without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<char, BufferError> {
        let size = self.len();
        if index >= size {
            return Err(BufferError::IndexOutOfBounds { index, size });
        }
        Ok(self.data[(self.head + index) & self.mask])
    }

    /// Removes every char and returns them in front-to-back order.
    pub fn drain_all(&mut self) -> String {
        let drained: String = self.iter().collect();
        self.clear();
        drained
    }

    /// Removes the first `n` chars and returns them in order.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InsufficientElements`] if `n > len()`; the deque
    /// is left untouched in that case.
    pub fn drain_front(&mut self, n: usize) -> Result<String, BufferError> {
        let size = self.len();
        if n > size {
            return Err(BufferError::InsufficientElements { requested: n, size });
        }
        let drained: String = self.iter().take(n).collect();
        self.head = (self.head + n) & self.mask;
        Ok(drained)
    }

    /// Shrinks the backing array to the smallest power of two that holds the
    /// current content plus the mandatory free slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::CharDeque;
    ///
    /// let mut deque = CharDeque::with_capacity(64);
    /// deque.extend_back(&['a', 'b', 'c']);
    /// deque.compact();
    /// assert_eq!(deque.capacity(), 4);
    /// assert_eq!(deque.drain_all(), "abc");
    /// ```
    pub fn compact(&mut self) {
        let len = self.len();
        self.reallocate((len + 1).next_power_of_two(), len);
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.len()).map(move |i| self.data[(self.head + i) & self.mask])
    }

    /// Makes room for `additional` more chars, keeping one slot free.
    fn reserve(&mut self, additional: usize) {
        let len = self.len();
        let needed = len + additional + 1;
        if needed > self.capacity() {
            self.reallocate(needed.next_power_of_two(), len);
        }
    }

    /// Doubles the capacity of a deque whose ring has just been filled.
    ///
    /// When full, `head == tail` and the content spans the whole array.
    fn grow_full(&mut self) {
        let capacity = self.capacity();
        self.reallocate(capacity << 1, capacity);
    }

    /// Moves the first `len` chars, starting at `head`, to the start of a new
    /// array of `capacity` slots.
    fn reallocate(&mut self, capacity: usize, len: usize) {
        debug_assert!(capacity.is_power_of_two() && capacity > len);
        let mut data = vec!['\0'; capacity].into_boxed_slice();
        let first = (self.data.len() - self.head).min(len);
        data[..first].copy_from_slice(&self.data[self.head..self.head + first]);
        data[first..len].copy_from_slice(&self.data[..len - first]);
        self.data = data;
        self.head = 0;
        self.tail = len;
        self.mask = capacity - 1;
    }
}

impl Default for CharDeque {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_and_lifo() {
        let mut deque = CharDeque::new();
        deque.push_back('a');
        deque.push_back('b');
        deque.push_front('z');
        assert_eq!(deque.pop_front(), Ok('z'));
        assert_eq!(deque.pop_back(), Ok('b'));
        assert_eq!(deque.pop_back(), Ok('a'));
        assert_eq!(deque.pop_back(), Err(BufferError::Empty));
        assert_eq!(deque.pop_front(), Err(BufferError::Empty));
    }

    #[test]
    fn test_growth_across_wrap_point() {
        let mut deque = CharDeque::with_capacity(4);
        // Move head and tail away from index 0 so the content wraps.
        deque.extend_back(&['x', 'x', 'x']);
        deque.drain_front(3).unwrap();
        for c in "abcdefghij".chars() {
            deque.push_back(c);
        }
        deque.push_front('0');
        assert_eq!(deque.len(), 11);
        assert_eq!(deque.capacity(), 16);
        assert_eq!(deque.drain_all(), "0abcdefghij");
    }

    #[test]
    fn test_never_full() {
        let mut deque = CharDeque::with_capacity(2);
        deque.push_back('a');
        assert_eq!(deque.capacity(), 2);
        deque.push_back('b');
        assert_eq!(deque.capacity(), 4);
        assert_eq!(deque.len(), 2);
    }

    #[test]
    fn test_bulk_insert_larger_than_capacity() {
        let mut deque = CharDeque::with_capacity(4);
        deque.push_back('m');
        let chars: Vec<char> = "abcdefgh".chars().collect();
        deque.extend_front(&chars);
        assert!(deque.capacity() > chars.len());
        deque.extend_back(&chars);
        assert_eq!(deque.drain_all(), "abcdefghmabcdefgh");
    }

    #[test]
    fn test_get() {
        let mut deque = CharDeque::new();
        deque.extend_back(&['a', 'b']);
        assert_eq!(deque.get(1), Ok('b'));
        assert_eq!(
            deque.get(2),
            Err(BufferError::IndexOutOfBounds { index: 2, size: 2 })
        );
    }

    #[test]
    fn test_drain_front() {
        let mut deque = CharDeque::new();
        deque.extend_back(&['a', 'b', 'c']);
        assert_eq!(
            deque.drain_front(4),
            Err(BufferError::InsufficientElements {
                requested: 4,
                size: 3
            })
        );
        assert_eq!(deque.drain_front(2).unwrap(), "ab");
        assert_eq!(deque.drain_all(), "c");
    }

    #[test]
    fn test_compact() {
        let mut deque = CharDeque::with_capacity(32);
        deque.compact();
        assert_eq!(deque.capacity(), 1);
        deque.push_back('a');
        deque.push_back('b');
        deque.push_back('c');
        deque.pop_front().unwrap();
        deque.compact();
        assert_eq!(deque.capacity(), 4);
        assert_eq!(format!("{:?}", deque), "['b', 'c']");
    }
}
