//! Identifier types.
//!
//! Feed identifiers (`StopId`, `TripId`) are opaque strings used at the
//! edges of the system. Inside the schedule every record lives in an arena
//! and is addressed by a dense index (`StopIdx`, `TripIdx`, `StopTimeIdx`),
//! so the search never hashes strings in its inner loop.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Feed identifier of a stop, platform or station.
    StopId
);

string_id!(
    /// Feed identifier of a trip.
    TripId
);

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the index as a `usize` for slice access.
            pub fn get(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

arena_index!(
    /// Position of a stop in the schedule's stop arena.
    StopIdx
);

arena_index!(
    /// Position of a trip in the schedule's trip arena.
    TripIdx
);

arena_index!(
    /// Position of a stop time in the schedule's stop-time arena.
    ///
    /// A trip's stop times occupy a contiguous run of this arena, so the
    /// stop time after `i` on the same trip is `i + 1`.
    StopTimeIdx
);

impl StopTimeIdx {
    /// Returns the index `n` places further along the arena.
    pub fn offset(self, n: u32) -> Self {
        StopTimeIdx(self.0 + n)
    }
}
