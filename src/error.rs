//! Error types. Hand-rolled, in the style the decode layer this crate sits
//! next to already uses (`enum` + manual `Display` + `impl std::error::Error`,
//! no derive-macro error crate) rather than introducing a second error style.

use std::{error, fmt};

use crate::model::Program;

/// Failure writing to the output sink, the only recoverable error an
/// `Emitter` call can return.
#[derive(Debug)]
pub enum EmitError {
    /// The sink reported a formatting failure (see `std::fmt::Write`).
    Sink(fmt::Error),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink(err) => write!(f, "failed writing to output sink: {err}"),
        }
    }
}

impl error::Error for EmitError {}

impl From<fmt::Error> for EmitError {
    fn from(err: fmt::Error) -> Self {
        Self::Sink(err)
    }
}

/// A violated §3 model invariant, as discovered by [`Program::validate`].
///
/// The emitter itself checks these with `debug_assert!` while it runs (cheap,
/// stripped in release, consistent with "may abort" framing for a confirmed
/// analysis-pass bug); `validate` is the non-panicking alternative for a host
/// that would rather report a bad model up front than risk an abort mid-emit.
///
/// "A subroutine has at most one return block" isn't in this list: it's
/// encoded as `Subroutine::returns: Option<BlockId>` instead, so a second
/// return block simply has nowhere to go rather than needing a runtime check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A block's `children` and `children_types` vectors have different
    /// lengths.
    MismatchedChildEdges { block: u32 },
    /// An instruction, block or variable index is out of range for its arena.
    DanglingReference { what: &'static str, index: u32 },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedChildEdges { block } => write!(
                f,
                "block {block}: children and children_types have different lengths"
            ),
            Self::DanglingReference { what, index } => {
                write!(f, "dangling {what} reference: index {index} out of range")
            }
        }
    }
}

impl error::Error for ModelError {}

impl Program {
    /// Checks the §3 invariants this crate relies on, without panicking.
    ///
    /// Returns every violation found rather than stopping at the first one,
    /// since a host calling this after a broken analysis pass usually wants
    /// the full picture.
    pub fn validate(&self) -> Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();

        for (i, block) in self.blocks.iter().enumerate() {
            if block.children.len() != block.children_types.len() {
                errors.push(ModelError::MismatchedChildEdges { block: i as u32 });
            }
            for &child in &block.children {
                if child.index() >= self.blocks.len() {
                    errors.push(ModelError::DanglingReference {
                        what: "block child",
                        index: child.0,
                    });
                }
            }
            for &instr in &block.instructions {
                if instr.index() >= self.instructions.len() {
                    errors.push(ModelError::DanglingReference {
                        what: "block instruction",
                        index: instr.0,
                    });
                }
            }
        }

        for sub in &self.subroutines {
            for &block in &sub.blocks {
                if block.index() >= self.blocks.len() {
                    errors.push(ModelError::DanglingReference {
                        what: "subroutine block",
                        index: block.0,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
