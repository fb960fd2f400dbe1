//! Field-level authorization and selective projection for Flock.
//!
//! [`AccessEvaluator`] answers "may this identity perform this operation on
//! this object?" by combining direct grants with role-inherited grants. The
//! [`project`] functions walk a per-structure rule table and copy a record
//! attribute into the output only when it has a value *and* the evaluator
//! permits it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! let evaluator = AccessEvaluator::new(&identity, &store, &store, org_id);
//! let info = project::person_information(person.as_ref(), &ctx, &evaluator).await;
//! ```

pub mod context;
pub mod evaluator;
pub mod project;
pub mod wire;

mod rules;

#[cfg(test)]
mod testing;

pub use context::{GradePromotion, ProjectionContext};
pub use evaluator::{AccessEvaluator, Authorizer};
