use std::ops::{Index, IndexMut};

/// Fixed-size, zero-initialized cell store for a [`Computer`](crate::computer::Computer).
///
/// Length is `max(requested, program.len())` and never changes afterwards.
/// Addresses are signed: any address that is negative or `>= len()` panics
/// on access. Programs are expected to be given enough room up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// Allocate memory and copy `program` into the low addresses.
    pub fn new(program: &[i64], requested: usize) -> Self {
        let mut cells = vec![0i64; requested.max(program.len())];
        cells[..program.len()].copy_from_slice(program);
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read a cell without panicking. Used by the decoder's look-ahead,
    /// which defaults missing parameter slots to zero.
    pub fn get(&self, addr: i64) -> Option<i64> {
        usize::try_from(addr)
            .ok()
            .and_then(|i| self.cells.get(i).copied())
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }

    fn slot(&self, addr: i64) -> usize {
        match usize::try_from(addr) {
            Ok(i) if i < self.cells.len() => i,
            _ => panic!(
                "memory access out of range: address {addr}, memory size {}",
                self.cells.len()
            ),
        }
    }
}

impl Index<i64> for Memory {
    type Output = i64;

    fn index(&self, addr: i64) -> &i64 {
        &self.cells[self.slot(addr)]
    }
}

impl IndexMut<i64> for Memory {
    fn index_mut(&mut self, addr: i64) -> &mut i64 {
        let i = self.slot(addr);
        &mut self.cells[i]
    }
}
