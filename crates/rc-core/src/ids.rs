//! Strongly typed identifier wrappers.
//!
//! All ids are `Copy + Ord + Hash` so they work as map keys (the controller
//! keeps its drivers in a `BTreeMap<CarId, _>` so iteration order is the id
//! order).  Ids are assigned by the host: car ids by the spawner, track ids
//! by the track loader, spec ids by whoever owns the car catalogue.

use std::fmt;

/// Generate a typed id wrapper around a `u32` with a short display prefix.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Raw value, widened for hashing and seed mixing.
            #[inline(always)]
            pub fn raw(self) -> u64 {
                self.0 as u64
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }
    };
}

typed_id! {
    /// A car taking part in the session (AI or player).
    pub struct CarId(u32) => "car";
}

typed_id! {
    /// Opaque track identity assigned at load time.  Two tracks with the
    /// same display name still get distinct ids.
    pub struct TrackId(u32) => "track";
}

typed_id! {
    /// Identity of a car performance spec.  Speed profiles are shared by
    /// every car using the same spec on the same track.
    pub struct SpecId(u32) => "spec";
}
