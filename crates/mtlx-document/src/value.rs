//! Typed MaterialX literal values.

use thiserror::Error;

/// A decoded literal value from an input's `type`/`value` attribute pair.
///
/// Matrices are representable so a document round-trips, but the material
/// translator does not map them onto any property (there is no
/// orientation/transform slot on the fixed-function material).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Int(i32),
    Bool(bool),
    Color3([f32; 3]),
    Color4([f32; 4]),
    Vector2([f32; 2]),
    Vector3([f32; 3]),
    Vector4([f32; 4]),
    Matrix33([f32; 9]),
    Matrix44([f32; 16]),
}

#[derive(Debug, Error)]
pub enum ValueParseError {
    #[error("unsupported value type `{0}`")]
    UnsupportedType(String),
    #[error("expected {expected} components in `{raw}`")]
    ComponentCount { expected: usize, raw: String },
    #[error("malformed component in `{0}`")]
    Malformed(String),
}

impl Value {
    /// Decodes a literal from its MaterialX type string and value string.
    pub fn parse(ty: &str, raw: &str) -> Result<Self, ValueParseError> {
        let raw = raw.trim();
        match ty {
            "float" => Ok(Value::Float(parse_scalar(raw)?)),
            "integer" => raw
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| ValueParseError::Malformed(raw.into())),
            "boolean" => match raw {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(ValueParseError::Malformed(raw.into())),
            },
            "color3" => Ok(Value::Color3(parse_components(raw)?)),
            "color4" => Ok(Value::Color4(parse_components(raw)?)),
            "vector2" => Ok(Value::Vector2(parse_components(raw)?)),
            "vector3" => Ok(Value::Vector3(parse_components(raw)?)),
            "vector4" => Ok(Value::Vector4(parse_components(raw)?)),
            "matrix33" => Ok(Value::Matrix33(parse_components(raw)?)),
            "matrix44" => Ok(Value::Matrix44(parse_components(raw)?)),
            other => Err(ValueParseError::UnsupportedType(other.into())),
        }
    }

    /// Scalar view used for truthiness checks (`alpha_mode`) and scalar
    /// slots that accept float or integer literals.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f32),
            Value::Bool(v) => Some(*v as i32 as f32),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            _ => false,
        }
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Value::Matrix33(_) | Value::Matrix44(_))
    }
}

fn parse_scalar(raw: &str) -> Result<f32, ValueParseError> {
    raw.parse::<f32>()
        .map_err(|_| ValueParseError::Malformed(raw.into()))
}

fn parse_components<const N: usize>(raw: &str) -> Result<[f32; N], ValueParseError> {
    let mut out = [0.0f32; N];
    let mut count = 0;
    for part in raw.split(',') {
        if count == N {
            return Err(ValueParseError::ComponentCount {
                expected: N,
                raw: raw.into(),
            });
        }
        out[count] = parse_scalar(part.trim())?;
        count += 1;
    }
    if count != N {
        return Err(ValueParseError::ComponentCount {
            expected: N,
            raw: raw.into(),
        });
    }
    Ok(out)
}
