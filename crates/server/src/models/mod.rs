//! Domain models and their stored document shapes.
//!
//! Each entity comes in two forms: the domain type handlers serialize
//! (validated, credential-free) and the document type the collections
//! store. Repositories own the mapping between the two.

pub mod customer;
pub mod restaurant;
