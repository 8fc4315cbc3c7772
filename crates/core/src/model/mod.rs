mod completion;
mod curriculum;
mod ids;
mod key;

pub use completion::CompletionMap;
pub use curriculum::{Curriculum, Problem, Step};
pub use ids::{IdentityError, UserId, UserIdentity};
pub use key::{ParseKeyError, ProblemKey};
