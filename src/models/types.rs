/// Integer backed identifier, stored as BIGINT and rendered as a plain number.
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Copy,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            postgres_types::ToSql,
            postgres_types::FromSql,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(transparent)]
        #[postgres(transparent)]
        #[serde(transparent)] // JSON = plain number
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub fn new(v: i64) -> Self {
                Self(v)
            }
            #[inline]
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }
        impl From<$name> for i64 {
            fn from(v: $name) -> i64 {
                v.0
            }
        }
    };
}

define_id!(ResourceId);
define_id!(BuildingId);
