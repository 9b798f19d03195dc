//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: an in-process store used without a database and in tests.
//! - **documents**: PDF and DOCX report renderers.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod documents;
pub mod memory;
pub mod persistence;
