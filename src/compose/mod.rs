//! Generation and translation of drafts.

mod composer;
mod session;

pub use composer::{
    CREDENTIAL_MISSING_MESSAGE, Composer, EMPTY_BODY_MESSAGE, Generated, GenerationRequest,
    Outcome, SERVICE_FAILURE_MESSAGE,
};
pub use session::{Session, SessionState};
