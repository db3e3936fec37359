//! Transform-time structural errors.
//!
//! Every variant marks input that the upstream syntax-acceptance stage can
//! never legally produce; all are unrecoverable for the current file and
//! propagate immediately with no partial output.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A decorated anonymous class appeared in a position that requires a
    /// name binding (bare statement or named export).
    #[error("decorated anonymous class requires a name as a {0}")]
    AnonymousClass(&'static str),

    /// A decorated object-literal member used a private name; object
    /// literals have no private-name concept.
    #[error("object literal member `#{0}` cannot be decorated: private names are not allowed here")]
    PrivateObjectMember(String),

    /// A decorated member was observed outside its required enclosing
    /// construct.
    #[error("decorated member found outside an enclosing {0}")]
    MisplacedMember(&'static str),
}
