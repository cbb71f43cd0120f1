/// A single tape cell. Cells never go below zero and never wrap.
pub type Cell = u64;

/// The interpreter's memory: a right-growing row of cells and a data pointer.
///
/// The tape starts as a single zero cell. Moving right past the end appends a
/// zero cell; moving left from cell 0 does nothing. The pointer therefore
/// always indexes a live cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    pointer: usize,
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: vec![0],
            pointer: 0,
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn current(&self) -> Cell {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: Cell) {
        self.cells[self.pointer] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.saturating_add(1);
    }

    /// Clamped at zero.
    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        if *cell > 0 {
            *cell -= 1;
        }
    }

    pub fn move_right(&mut self) {
        self.pointer += 1;
        if self.pointer == self.cells.len() {
            self.cells.push(0);
        }
    }

    /// Clamped at cell 0.
    pub fn move_left(&mut self) {
        if self.pointer > 0 {
            self.pointer -= 1;
        }
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_zero_cell() {
        let tape = Tape::new();
        assert_eq!(tape.cells(), &[0]);
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn decrement_at_zero_is_a_no_op() {
        let mut tape = Tape::new();
        tape.decrement();
        assert_eq!(tape.current(), 0);
        tape.increment();
        tape.decrement();
        tape.decrement();
        assert_eq!(tape.current(), 0);
    }

    #[test]
    fn increment_does_not_wrap_at_byte_width() {
        let mut tape = Tape::new();
        for _ in 0..300 {
            tape.increment();
        }
        assert_eq!(tape.current(), 300);
    }

    #[test]
    fn increment_saturates_at_cell_maximum() {
        let mut tape = Tape::new();
        tape.set_current(Cell::MAX);
        tape.increment();
        assert_eq!(tape.current(), Cell::MAX);
    }

    #[test]
    fn moving_right_grows_the_tape_once_per_new_cell() {
        let mut tape = Tape::new();
        tape.move_right();
        tape.move_right();
        tape.move_right();
        assert_eq!(tape.cells().len(), 4);
        assert_eq!(tape.pointer(), 3);

        tape.move_left();
        tape.move_right();
        assert_eq!(tape.cells().len(), 4);
    }

    #[test]
    fn moving_left_from_origin_is_clamped() {
        let mut tape = Tape::new();
        tape.move_left();
        assert_eq!(tape.pointer(), 0);
        assert_eq!(tape.cells().len(), 1);
    }
}
