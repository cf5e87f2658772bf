pub mod generation_ctx;
pub mod generation_flow;

pub use generation_ctx::ItemCtx;
pub use generation_flow::{GenerationFlow, ItemOutcome};
