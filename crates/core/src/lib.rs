pub mod intent;
pub mod models;
pub mod responder;

pub use intent::{classify, Intent, IntentRule, INTENT_RULES};
pub use models::*;
pub use responder::respond;
