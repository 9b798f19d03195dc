//! Strongly typed row identifiers.
//!
//! Every table uses a store-assigned 32-bit serial key. Wrapping each one in
//! its own type keeps a pupil id from being passed where a class id belongs.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store key.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw store key.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`crate::domain::SchoolYear`].
    SchoolYearId
);
define_id!(
    /// Identifier of a [`crate::domain::Class`].
    ClassId
);
define_id!(
    /// Identifier of a [`crate::domain::Pupil`].
    PupilId
);
define_id!(
    /// Identifier of a [`crate::domain::Category`].
    CategoryId
);
define_id!(
    /// Identifier of an [`crate::domain::Entry`].
    EntryId
);
