//! Brace tracking for code blocks.
//!
//! Each `{` pushes a frame and each `}` pops one. Frames never change after
//! they are pushed; a class body gets a frame whose context is rooted at the
//! class, and leaving the body restores the enclosing frame's context.

use smol_str::SmolStr;

use crate::base::Location;
use crate::error::ResolveError;
use crate::resolve::ResolveContext;

/// One brace level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub ctx: ResolveContext,
    /// Class name for class bodies, empty otherwise.
    pub name: SmolStr,
    pub is_class: bool,
}

impl ScopeFrame {
    pub fn plain(ctx: ResolveContext) -> Self {
        Self {
            ctx,
            name: SmolStr::default(),
            is_class: false,
        }
    }

    pub fn class(ctx: ResolveContext, name: impl Into<SmolStr>) -> Self {
        Self {
            ctx,
            name: name.into(),
            is_class: true,
        }
    }
}

/// Stack of brace frames; the bottom frame is the block's starting context.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new(initial: ScopeFrame) -> Self {
        Self {
            frames: vec![initial],
        }
    }

    pub fn current(&self) -> &ScopeFrame {
        // The bottom frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        tracing::debug!(
            depth = self.frames.len(),
            name = %frame.name,
            "[SCAN] enter scope"
        );
        self.frames.push(frame);
    }

    /// Leave the innermost scope. Closing the block's own level is an error.
    pub fn pop(&mut self, location: &Location) -> Result<ScopeFrame, ResolveError> {
        let popped = if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        };
        let Some(frame) = popped else {
            return Err(ResolveError::MalformedScopeNesting {
                location: location.clone(),
            });
        };
        tracing::debug!(depth = self.frames.len(), name = %frame.name, "[SCAN] leave scope");
        Ok(frame)
    }
}
