//! The fetch-execute loop.
//!
//! An [`Interpreter`] borrows a parsed [`Program`] and runs it against a fresh
//! [`Tape`], reading `,` bytes from any [`Read`] and writing `.` bytes to any
//! [`Write`]:
//!
//! ```
//! use tape_bf::{Interpreter, Program};
//!
//! let program = Program::parse("++++++++.").unwrap();
//! let mut out = Vec::new();
//! Interpreter::new(&program, std::io::empty(), &mut out).run().unwrap();
//! assert_eq!(out, [8]);
//! ```

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::error::{ConfigError, RunError};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::tape::{Cell, Tape};

/// What `,` stores when the input stream is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EofBehavior {
    /// Set the current cell to 0.
    #[default]
    Zero,
    /// Leave the current cell as it was.
    Unchanged,
}

impl FromStr for EofBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(Self::Zero),
            "unchanged" | "keep" => Ok(Self::Unchanged),
            _ => Err(ConfigError::InvalidEof(s.to_string())),
        }
    }
}

impl fmt::Display for EofBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofBehavior::Zero => write!(f, "zero"),
            EofBehavior::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone, Default)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            max_steps,
            cancel_flag,
        }
    }
}

/// Runs one program to completion.
///
/// The interpreter owns its tape exclusively; every call to a `run*` method
/// starts again from a single zero cell with the pointer at 0.
pub struct Interpreter<'p, R, W> {
    program: &'p Program,
    tape: Tape,
    input: R,
    output: W,
    eof: EofBehavior,
    steps: u64,
}

impl<'p, R: Read, W: Write> Interpreter<'p, R, W> {
    pub fn new(program: &'p Program, input: R, output: W) -> Self {
        Self {
            program,
            tape: Tape::new(),
            input,
            output,
            eof: EofBehavior::default(),
            steps: 0,
        }
    }

    pub fn with_eof_behavior(mut self, eof: EofBehavior) -> Self {
        self.eof = eof;
        self
    }

    /// The tape as left by the most recent run.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Instructions executed by the most recent run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Execute the program until the program counter runs off the end.
    pub fn run(&mut self) -> Result<(), RunError> {
        self.execute(false, None)
    }

    /// Debug-run the program, writing a step-by-step table of operations to
    /// the output instead of the program's own bytes. Tape and pointer evolve
    /// exactly as in a real run, but:
    /// - `.` does not emit its byte; the action is logged instead
    /// - `,` does not read input; end of input is simulated
    pub fn run_debug(&mut self) -> Result<(), RunError> {
        self.execute(true, None)
    }

    /// Execute with cooperative cancellation and optional step limit.
    pub fn run_with_control(&mut self, step_control: StepControl) -> Result<(), RunError> {
        self.execute(false, Some(&step_control))
    }

    /// Debug-run with cooperative cancellation and optional step limit.
    pub fn run_debug_with_control(&mut self, step_control: StepControl) -> Result<(), RunError> {
        self.execute(true, Some(&step_control))
    }

    fn execute(&mut self, debug: bool, step_control: Option<&StepControl>) -> Result<(), RunError> {
        self.tape = Tape::new();
        self.steps = 0;

        let program = self.program;
        let instructions = program.instructions();
        let mut pc = 0;

        if debug {
            self.emit_line(
                pc,
                format_args!("STEP | IP  | PTR | CELL | INSTR | ACTION"),
            )?;
            self.emit_line(
                pc,
                format_args!(
                    "-----+-----+-----+------+-------+------------------------------------------------"
                ),
            )?;
        }

        while pc < instructions.len() {
            if let Some(ctrl) = step_control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(RunError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if self.steps >= max as u64 {
                        return Err(RunError::StepLimitExceeded { limit: max });
                    }
                }
            }

            let instr = instructions[pc];
            let (ptr_before, cell_before) = (self.tape.pointer(), self.tape.current());
            let ip = pc;
            let mut action: Option<String> = if debug { Some(String::new()) } else { None };

            match instr {
                Instruction::Increment => {
                    self.tape.increment();
                    if let Some(a) = action.as_mut() {
                        *a = format!(
                            "Increment cell[{}] from {} to {}",
                            ptr_before,
                            cell_before,
                            self.tape.current()
                        );
                    }
                }
                Instruction::Decrement => {
                    if cell_before > 0 {
                        self.tape.decrement();
                        if let Some(a) = action.as_mut() {
                            *a = format!(
                                "Decrement cell[{}] from {} to {}",
                                ptr_before,
                                cell_before,
                                self.tape.current()
                            );
                        }
                    } else if let Some(a) = action.as_mut() {
                        *a = format!("Cell[{ptr_before}] is 0; decrement ignored");
                    }
                }
                Instruction::MoveRight => {
                    self.tape.move_right();
                    if let Some(a) = action.as_mut() {
                        *a = format!("Moved pointer head to index {}", self.tape.pointer());
                    }
                }
                Instruction::MoveLeft => {
                    if ptr_before > 0 {
                        self.tape.move_left();
                        if let Some(a) = action.as_mut() {
                            *a = format!("Moved pointer head to index {}", self.tape.pointer());
                        }
                    } else if let Some(a) = action.as_mut() {
                        *a = "Pointer at index 0; move ignored".to_string();
                    }
                }
                Instruction::Output => {
                    let byte = output_byte(cell_before);
                    if let Some(a) = action.as_mut() {
                        *a = format!("Output byte {byte} (suppressed in debug)");
                    } else {
                        self.output
                            .write_all(&[byte])
                            .map_err(|source| RunError::Io { ip, source })?;
                    }
                }
                Instruction::Input => {
                    let read = if debug { None } else { self.read_byte(ip)? };
                    match (read, self.eof) {
                        (Some(b), _) => self.tape.set_current(Cell::from(b)),
                        (None, EofBehavior::Zero) => self.tape.set_current(0),
                        (None, EofBehavior::Unchanged) => {}
                    }
                    if let Some(a) = action.as_mut() {
                        *a = format!(
                            "Read byte -> simulated end of input ({}), cell is {}",
                            self.eof,
                            self.tape.current()
                        );
                    }
                }
                Instruction::LoopStart => {
                    if cell_before == 0 {
                        let j = self.jump(pc);
                        if let Some(a) = action.as_mut() {
                            *a = format!("Cell is 0; jump forward to matching ']' at IP {j}");
                        }
                        pc = j;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                }
                Instruction::LoopEnd => {
                    if cell_before != 0 {
                        let j = self.jump(pc);
                        if let Some(a) = action.as_mut() {
                            *a = format!("Cell != 0; jump back to matching '[' at IP {j}");
                        }
                        pc = j;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                }
            }

            log::trace!(
                "step={} ip={} instr={} ptr={} cell={}",
                self.steps,
                ip,
                instr,
                self.tape.pointer(),
                self.tape.current()
            );

            if let Some(action) = action {
                let step = self.steps;
                self.emit_line(
                    ip,
                    format_args!(
                        "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                        step, ip, ptr_before, cell_before, instr, action
                    ),
                )?;
            }

            self.steps += 1;
            // A jump lands on the partner bracket; this moves one past it.
            pc += 1;
        }

        log::debug!(
            "program finished after {} steps; tape grew to {} cells",
            self.steps,
            self.tape.cells().len()
        );
        Ok(())
    }

    fn jump(&self, pc: usize) -> usize {
        // Program::parse pairs every bracket, so a missing target cannot occur;
        // staying put keeps the loop total rather than panicking.
        self.program.jump_target(pc).unwrap_or(pc)
    }

    /// Read exactly one byte of input. `Ok(None)` means end of input.
    fn read_byte(&mut self, ip: usize) -> Result<Option<u8>, RunError> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(RunError::Io { ip, source }),
            }
        }
    }

    fn emit_line(&mut self, ip: usize, line: fmt::Arguments<'_>) -> Result<(), RunError> {
        writeln!(self.output, "{line}").map_err(|source| RunError::Io { ip, source })
    }
}

/// Cells are wider than a byte; output keeps the low eight bits.
fn output_byte(cell: Cell) -> u8 {
    (cell & 0xff) as u8
}
