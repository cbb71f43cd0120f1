use std::fmt;

/// One of the eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Map a source character to its instruction. Anything outside `><+-.,[]`
    /// is commentary and yields `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Increment),
            '-' => Some(Self::Decrement),
            '>' => Some(Self::MoveRight),
            '<' => Some(Self::MoveLeft),
            '.' => Some(Self::Output),
            ',' => Some(Self::Input),
            '[' => Some(Self::LoopStart),
            ']' => Some(Self::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Increment => '+',
            Self::Decrement => '-',
            Self::MoveRight => '>',
            Self::MoveLeft => '<',
            Self::Output => '.',
            Self::Input => ',',
            Self::LoopStart => '[',
            Self::LoopEnd => ']',
        }
    }

    pub fn is_bracket(self) -> bool {
        matches!(self, Self::LoopStart | Self::LoopEnd)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_instruction_char_maps_back_to_itself() {
        for c in "+-><.,[]".chars() {
            let instr = Instruction::from_char(c).expect("instruction char");
            assert_eq!(instr.as_char(), c);
        }
    }

    #[test]
    fn comment_characters_are_not_instructions() {
        for c in "abc 019\n\t#!".chars() {
            assert_eq!(Instruction::from_char(c), None);
        }
    }

    #[test]
    fn only_loop_instructions_are_brackets() {
        assert!(Instruction::LoopStart.is_bracket());
        assert!(Instruction::LoopEnd.is_bracket());
        assert!(!Instruction::Output.is_bracket());
    }
}
