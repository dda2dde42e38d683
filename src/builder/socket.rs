//! Host socket types and their nodelang type annotations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nodelang_core::lang::types::PrimitiveTypeId;
use nodelang_syntax::ast::Type;

/// Output socket type of a host graph node, spelled the way the host reports it (`VALUE`, `RGBA`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocketType {
    Custom,
    Value,
    Int,
    Boolean,
    Vector,
    String,
    Rgba,
    Shader,
    Image,
    Geometry,
}

impl SocketType {
    pub const ALL: [SocketType; 10] = [
        SocketType::Custom,
        SocketType::Value,
        SocketType::Int,
        SocketType::Boolean,
        SocketType::Vector,
        SocketType::String,
        SocketType::Rgba,
        SocketType::Shader,
        SocketType::Image,
        SocketType::Geometry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SocketType::Custom => "CUSTOM",
            SocketType::Value => "VALUE",
            SocketType::Int => "INT",
            SocketType::Boolean => "BOOLEAN",
            SocketType::Vector => "VECTOR",
            SocketType::String => "STRING",
            SocketType::Rgba => "RGBA",
            SocketType::Shader => "SHADER",
            SocketType::Image => "IMAGE",
            SocketType::Geometry => "GEOMETRY",
        }
    }

    /// Type annotation for a declaration produced from a node with this output type.
    ///
    /// `CUSTOM` sockets carry no annotation. Shader sockets are all annotated `bsdf`, even though the host
    /// has other closure kinds.
    pub fn primitive_type(self) -> Option<Type> {
        let f32 = Type::Primitive(PrimitiveTypeId::F32);
        match self {
            SocketType::Custom => None,
            SocketType::Value | SocketType::Geometry => Some(f32),
            SocketType::Int => Some(Type::Primitive(PrimitiveTypeId::I32)),
            SocketType::Boolean => Some(Type::Primitive(PrimitiveTypeId::B8)),
            SocketType::Vector => Some(Type::array(f32, 3)),
            SocketType::String => Some(Type::Primitive(PrimitiveTypeId::Str)),
            SocketType::Rgba | SocketType::Image => Some(Type::array(f32, 4)),
            SocketType::Shader => Some(Type::Primitive(PrimitiveTypeId::Bsdf)),
        }
    }
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host reported a socket type this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown socket type `{0}`")]
pub struct UnknownSocketType(pub String);

impl FromStr for SocketType {
    type Err = UnknownSocketType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocketType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownSocketType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodelang_syntax::serialize::serialize_decl;

    #[test]
    fn test_primitive_type_mapping() {
        let rendered: Vec<(SocketType, Option<String>)> = SocketType::ALL
            .into_iter()
            .map(|ty| (ty, ty.primitive_type().map(|t| t.to_string())))
            .collect();
        let expected = [
            (SocketType::Custom, None),
            (SocketType::Value, Some("f32")),
            (SocketType::Int, Some("i32")),
            (SocketType::Boolean, Some("b8")),
            (SocketType::Vector, Some("f32[3]")),
            (SocketType::String, Some("str")),
            (SocketType::Rgba, Some("f32[4]")),
            (SocketType::Shader, Some("bsdf")),
            (SocketType::Image, Some("f32[4]")),
            (SocketType::Geometry, Some("f32")),
        ];
        for ((ty, got), (want_ty, want)) in rendered.into_iter().zip(expected) {
            assert_eq!(ty, want_ty);
            assert_eq!(got.as_deref(), want, "socket type {ty}");
        }
    }

    #[test]
    fn test_parse_socket_type() {
        assert_eq!("RGBA".parse::<SocketType>(), Ok(SocketType::Rgba));
        assert_eq!(
            "rgba".parse::<SocketType>(),
            Err(UnknownSocketType("rgba".to_string()))
        );
        for ty in SocketType::ALL {
            assert_eq!(ty.as_str().parse::<SocketType>(), Ok(ty));
        }
    }

    #[test]
    fn test_serde_spelling_matches_host() {
        let ty: SocketType = serde_json::from_str("\"VECTOR\"").unwrap();
        assert_eq!(ty, SocketType::Vector);
        assert_eq!(serde_json::to_string(&SocketType::Shader).unwrap(), "\"SHADER\"");
    }

    #[test]
    fn test_annotation_in_declaration() {
        let mut module = nodelang_syntax::ast::Module::new();
        let value = module.literal(vec![0.8, 0.1, 0.1, 1.0]);
        let mut decl = nodelang_syntax::ast::ConstDecl::new("Base Color", value);
        decl.ty = SocketType::Rgba.primitive_type();
        assert_eq!(
            serialize_decl(&module, &decl),
            "const 'Base Color': f32[4] = [0.8, 0.1, 0.1, 1.0]"
        );
    }
}
