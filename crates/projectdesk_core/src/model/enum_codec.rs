//! Lenient string <-> enum conversion shared by every enum-valued field.
//!
//! # Responsibility
//! - Decode loosely formatted tokens (`in-progress`, `In_Progress`) into
//!   enum members.
//! - Encode members back to their canonical upper-case name.
//!
//! # Invariants
//! - One normalization rule for all enums: `-` becomes `_`, then a
//!   case-insensitive match against member names.
//! - `decode(encode(v)) == v` for every member `v`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Enum whose members are addressable by a canonical upper-case name.
///
/// Implementors only declare their member list and names; matching rules
/// live in [`decode`] so they cannot drift between enum types.
pub trait CodecEnum: Copy + Sized + 'static {
    /// Type label used in error messages, e.g. `TaskStatus`.
    const TYPE_NAME: &'static str;
    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];

    /// Canonical member name, upper-case with `_` separators.
    fn canonical_name(self) -> &'static str;
}

/// Decode failure: no member matched the normalized token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnumValue {
    pub type_name: &'static str,
    pub value: String,
}

impl Display for UnknownEnumValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} value: `{}`", self.type_name, self.value)
    }
}

impl Error for UnknownEnumValue {}

/// Decodes `raw` into a member of `E`.
///
/// # Errors
/// - Returns [`UnknownEnumValue`] when no member matches after normalization.
pub fn decode<E: CodecEnum>(raw: &str) -> Result<E, UnknownEnumValue> {
    let normalized = raw.replace('-', "_");
    E::MEMBERS
        .iter()
        .copied()
        .find(|member| member.canonical_name().eq_ignore_ascii_case(&normalized))
        .ok_or_else(|| UnknownEnumValue {
            type_name: E::TYPE_NAME,
            value: raw.to_string(),
        })
}

/// Encodes a member to its canonical upper-case name.
pub fn encode<E: CodecEnum>(value: E) -> &'static str {
    value.canonical_name()
}

/// Returns `A|B|C` for error messages listing accepted values.
pub fn accepted_values<E: CodecEnum>() -> String {
    E::MEMBERS
        .iter()
        .map(|member| member.canonical_name())
        .collect::<Vec<_>>()
        .join("|")
}

/// Wires serde through the codec so JSON projections stay lenient on read
/// and canonical on write.
macro_rules! codec_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::model::enum_codec::encode(*self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                $crate::model::enum_codec::decode(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::model::enum_codec::encode(*self))
            }
        }
    };
}

pub(crate) use codec_serde;
