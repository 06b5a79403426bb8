//! Trigger: who asked for a pricing run.

/// Who asked for a pricing run.
///
/// Only webhook senders pass through the label access gate; an operator
/// running pricebot by hand is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger<'a> {
    /// A person running `pricebot issue` directly.
    Operator,

    /// A webhook event sent by this login.
    Sender(&'a str),

    /// A webhook event that names no sender.
    Anonymous,
}
