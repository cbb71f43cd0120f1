//! Preprocessing: filter raw source down to instructions and pair up loops.

use std::fmt;
use std::str::FromStr;

use crate::error::{BracketKind, ParseError};
use crate::instruction::Instruction;

/// Where an as-yet unmatched `[` sits, both in the filtered stream and in the
/// raw source (for diagnostics).
#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
}

/// A validated Brainfuck program: the filtered instruction stream plus the
/// precomputed jump table for its brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    // jumps[i] holds the matching index for '[' or ']' at index i.
    // For non-bracket positions, it is None.
    jumps: Vec<Option<usize>>,
}

impl Program {
    /// Filter `source` and build the jump table in a single pass.
    ///
    /// Every character outside `><+-.,[]` is discarded. Returns
    /// [`ParseError::UnmatchedBracket`] if a `]` has no opener or a `[` is
    /// never closed; in the latter case the innermost open bracket is reported.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut instructions = Vec::with_capacity(source.len());
        let mut jumps = Vec::with_capacity(source.len());
        let mut stack: Vec<OpenBracket> = Vec::new();

        let (mut line, mut column) = (1usize, 0usize);
        for (offset, c) in source.chars().enumerate() {
            if c == '\n' {
                line += 1;
                column = 0;
                continue;
            }
            column += 1;

            let Some(instr) = Instruction::from_char(c) else {
                continue;
            };

            let position = instructions.len();
            instructions.push(instr);
            jumps.push(None);

            match instr {
                Instruction::LoopStart => stack.push(OpenBracket {
                    position,
                    offset,
                    line,
                    column,
                }),
                Instruction::LoopEnd => {
                    let Some(open) = stack.pop() else {
                        return Err(ParseError::UnmatchedBracket {
                            kind: BracketKind::Close,
                            position,
                            offset,
                            line,
                            column,
                        });
                    };
                    jumps[open.position] = Some(position);
                    jumps[position] = Some(open.position);
                }
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::UnmatchedBracket {
                kind: BracketKind::Open,
                position: open.position,
                offset: open.offset,
                line: open.line,
                column: open.column,
            });
        }

        log::debug!(
            "parsed {} instructions ({} loops) from {} source chars",
            instructions.len(),
            jumps.iter().flatten().count() / 2,
            source.chars().count()
        );

        Ok(Self {
            instructions,
            jumps,
        })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of bracket pairs.
    pub fn loop_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|&&i| i == Instruction::LoopStart)
            .count()
    }

    /// The position of the bracket matching the one at `position`, or `None`
    /// if `position` does not hold a bracket.
    pub fn jump_target(&self, position: usize) -> Option<usize> {
        self.jumps.get(position).copied().flatten()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the canonical source: instruction characters only.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comment_characters() {
        let program = Program::parse("a+++b.c").unwrap();
        assert_eq!(program.to_string(), "+++.");
        assert_eq!(program.len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let raw = "hello [ world ]\n++ comment >,. <-";
        let once = Program::parse(raw).unwrap();
        let twice = Program::parse(&once.to_string()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn jump_table_pairs_nested_loops() {
        // positions: 0:'+' 1:'[' 2:'>' 3:'[' 4:'-' 5:']' 6:'<' 7:']'
        let program = Program::parse("+[>[-]<]").unwrap();
        assert_eq!(program.jump_target(1), Some(7));
        assert_eq!(program.jump_target(7), Some(1));
        assert_eq!(program.jump_target(3), Some(5));
        assert_eq!(program.jump_target(5), Some(3));
        assert_eq!(program.jump_target(0), None);
        assert_eq!(program.jump_target(100), None);
        assert_eq!(program.loop_count(), 2);
    }

    #[test]
    fn jump_table_round_trips_through_every_bracket() {
        let program = Program::parse("[[]][[[]]]x[[][]]").unwrap();
        for (pos, instr) in program.instructions().iter().enumerate() {
            if instr.is_bracket() {
                let partner = program.jump_target(pos).expect("bracket has a partner");
                assert_eq!(program.jump_target(partner), Some(pos));
                if *instr == Instruction::LoopStart {
                    assert!(partner > pos);
                }
            } else {
                assert_eq!(program.jump_target(pos), None);
            }
        }
    }

    #[test]
    fn jump_positions_index_the_filtered_stream() {
        let program = Program::parse("xx[yy]zz").unwrap();
        assert_eq!(program.jump_target(0), Some(1));
        assert_eq!(program.jump_target(1), Some(0));
    }

    #[test]
    fn unmatched_open_bracket_is_rejected() {
        let err = Program::parse("[+").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnmatchedBracket {
                kind: BracketKind::Open,
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn innermost_unclosed_bracket_is_reported() {
        let err = Program::parse("[[]\n  [").unwrap_err();
        let ParseError::UnmatchedBracket {
            kind,
            position,
            offset,
            line,
            column,
        } = err;
        assert_eq!(kind, BracketKind::Open);
        assert_eq!(position, 3);
        assert_eq!(offset, 6);
        assert_eq!((line, column), (2, 3));
    }

    #[test]
    fn unmatched_close_bracket_is_rejected() {
        let err = Program::parse("+]").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnmatchedBracket {
                kind: BracketKind::Close,
                position: 1,
                offset: 1,
                line: 1,
                column: 2,
            }
        ));
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        let program: Program = "no instructions here".parse().unwrap();
        assert!(program.is_empty());
        assert_eq!(program.to_string(), "");
    }
}
