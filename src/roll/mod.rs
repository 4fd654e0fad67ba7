mod ctx;
mod roller;
mod stringify;
mod tree;

pub use ctx::RollContext;
pub use roller::{Roller, SecureRoller};
pub use stringify::{
    AcceptStringify, MarkdownStringifier, RenderOptions, SimpleStringifier, Stringify,
};
pub use tree::{
    Eval, ExpressionRoll, IntTermResult, MultiDieTermResult, ParseResolutionError, Pick,
    Resolution, ResolvedRoll, TermResult,
};

#[cfg(test)]
pub(crate) use roller::StepRoller;
