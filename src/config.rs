//! Settings schema and loading.
//!
//! The schema lives in `config::schema`; `config::load` adds the
//! file/environment loading and validation on top of it.

mod load;
mod schema;

pub use schema::*;
