//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_form_repository;

pub use in_memory_form_repository::InMemoryFormRepository;
