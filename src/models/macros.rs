/// Declares an `i64` newtype used as a storage identifier.
///
/// Every persisted entity in this crate keys on an `i64` surrogate id, so the
/// inner type is fixed. Generates the ordering/hash/serde derives the
/// repository layer relies on, `Display`, conversions to and from the raw
/// integer, and `new`/`value` accessors. The field stays private so raw
/// integers only enter through the conversions.
///
/// Usage:
///   define_id_type!(ConfigId);
#[macro_export]
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}
