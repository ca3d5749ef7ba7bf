use crate::prelude::*;

/// A stream that always holds a current value which can be read
/// synchronously, in addition to broadcasting every change.
///
/// `peek` returns a clone of the current value; implementors keep the value
/// behind a shared cell, so a plain reference cannot be handed out.
pub trait Behavior: Observable {
  /// Get the value contained currently in the behavior.
  fn peek(&self) -> Self::Item;
}
