//! Detection result types for fakecheckr

mod result;

pub use result::{
    CallerResponse, ColorToken, FallbackReason, Label, Outcome, ScoreSource, Verdict,
    VALIDATION_MESSAGE,
};
