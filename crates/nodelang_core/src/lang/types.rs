//! Primitive type tags.
//!
//! Type annotations in nodelang are carried as data only. A type name that is not in this registry refers to a
//! struct by name.
//!
//! ## Examples
//! ```rust
//! use nodelang_core::lang::types::{self, PrimitiveTypeId};
//!
//! assert_eq!(types::from_str("bsdf"), Some(PrimitiveTypeId::Bsdf));
//! assert_eq!(types::from_str("Material"), None);
//! ```

/// Stable identifier for a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTypeId {
    F32,
    I32,
    U32,
    B8,
    Bsdf,
    Str,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveTypeInfo {
    pub id: PrimitiveTypeId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of all primitive types, in `PrimitiveTypeId` declaration order.
pub const PRIMITIVE_TYPES: &[PrimitiveTypeInfo] = &[
    info(PrimitiveTypeId::F32, "f32", "32-bit float"),
    info(PrimitiveTypeId::I32, "i32", "32-bit signed integer"),
    info(PrimitiveTypeId::U32, "u32", "32-bit unsigned integer"),
    info(PrimitiveTypeId::B8, "b8", "boolean"),
    info(PrimitiveTypeId::Bsdf, "bsdf", "shader closure"),
    info(PrimitiveTypeId::Str, "str", "string"),
];

/// Return the metadata entry for a primitive type.
pub const fn info_for(id: PrimitiveTypeId) -> &'static PrimitiveTypeInfo {
    &PRIMITIVE_TYPES[id as usize]
}

/// Return the canonical spelling of a primitive type.
pub const fn as_str(id: PrimitiveTypeId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a type name to a primitive, if it is one.
pub fn from_str(spelling: &str) -> Option<PrimitiveTypeId> {
    PRIMITIVE_TYPES.iter().find(|t| t.canonical == spelling).map(|t| t.id)
}

const fn info(id: PrimitiveTypeId, canonical: &'static str, description: &'static str) -> PrimitiveTypeInfo {
    PrimitiveTypeInfo {
        id,
        canonical,
        description,
    }
}
