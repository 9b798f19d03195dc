//! Failure type shared by every store-backed port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by store adapters.
    pub enum RepositoryError {
        /// No connection to the store could be obtained.
        Connection { message: String } =>
            "store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "store query failed: {message}",
        /// A written row references a parent that does not exist.
        MissingReference { relation: String } =>
            "referenced {relation} does not exist",
        /// A deleted row is still referenced by child rows.
        StillReferenced { relation: String } =>
            "row is still referenced by {relation}",
    }
}
