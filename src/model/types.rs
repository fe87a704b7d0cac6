use std::fmt;

/// Type names recognised as calendar timestamps when they appear as composites.
const TIMESTAMP_TYPE_NAMES: [&str; 6] = [
    "time.Time",
    "Time",
    "DateTime",
    "NaiveDateTime",
    "SystemTime",
    "Timestamp",
];

/// Closed universe of field types the schema deriver understands.
///
/// Models describe themselves with these variants instead of being reflected
/// on at runtime, so derivation is an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Any string-like primitive
    String,
    /// Integer of the given width; `bits == 0` means platform width
    Int { bits: u8, signed: bool },
    /// `f32` / `f64`
    Float,
    /// `bool`
    Bool,
    /// A collection; the element kind is recorded but not introspected
    Sequence(Box<TypeKind>),
    /// A calendar timestamp (serialized as RFC 3339)
    Timestamp,
    /// A nested structure with its own fields
    Composite(TypeDescriptor),
    /// Anything else, carried by name for diagnostics
    Unknown(String),
}

impl TypeKind {
    pub fn u64() -> Self {
        TypeKind::Int {
            bits: 64,
            signed: false,
        }
    }

    pub fn i64() -> Self {
        TypeKind::Int {
            bits: 64,
            signed: true,
        }
    }

    pub fn i32() -> Self {
        TypeKind::Int {
            bits: 32,
            signed: true,
        }
    }

    pub fn seq(inner: TypeKind) -> Self {
        TypeKind::Sequence(Box::new(inner))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, TypeKind::Int { .. })
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::String => write!(f, "string"),
            TypeKind::Int { bits: 0, signed } => {
                write!(f, "{}", if *signed { "int" } else { "uint" })
            }
            TypeKind::Int { bits, signed } => {
                write!(f, "{}{}", if *signed { "i" } else { "u" }, bits)
            }
            TypeKind::Float => write!(f, "float"),
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Sequence(inner) => write!(f, "[{inner}]"),
            TypeKind::Timestamp => write!(f, "timestamp"),
            TypeKind::Composite(desc) => write!(f, "{}", desc.name),
            TypeKind::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// Check whether a composite type name denotes a calendar timestamp.
#[must_use]
pub fn is_timestamp_name(name: &str) -> bool {
    TIMESTAMP_TYPE_NAMES.contains(&name)
        || name.ends_with("::DateTime")
        || name.starts_with("DateTime<")
}

/// One field of a described model.
///
/// `tag` is the raw serialization tag: `"name"`, `"name,omitempty"`,
/// `",omitempty"` or `"-"`. An absent or empty tag excludes the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Source identifier (e.g. `CreatedAt`)
    pub ident: String,
    /// Raw serialization tag, if any
    pub tag: Option<String>,
    /// Field type
    pub kind: TypeKind,
}

impl FieldDescriptor {
    /// A field without a serialization tag (never documented).
    pub fn new(ident: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            ident: ident.into(),
            tag: None,
            kind,
        }
    }

    pub fn tagged(ident: impl Into<String>, kind: TypeKind, tag: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            tag: Some(tag.into()),
            kind,
        }
    }

    /// Name under which the field appears on the wire.
    ///
    /// Returns `None` when the tag is absent, empty or the explicit `-` marker.
    /// A tag with an empty name segment falls back to the lower-cased identifier.
    #[must_use]
    pub fn wire_name(&self) -> Option<String> {
        let tag = self.tag.as_deref()?;
        if tag.is_empty() || tag == "-" {
            return None;
        }
        let name = tag.split(',').next().unwrap_or_default();
        if name.is_empty() {
            Some(self.ident.to_lowercase())
        } else {
            Some(name.to_string())
        }
    }

    /// Whether the tag carries the `omitempty` modifier.
    #[must_use]
    pub fn is_omittable(&self) -> bool {
        self.tag
            .as_deref()
            .map(|tag| tag.split(',').skip(1).any(|m| m.trim() == "omitempty"))
            .unwrap_or(false)
    }
}

/// Structural description of one registered model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Schema name in `components.schemas` (e.g. `User`)
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// Types that can describe their own wire structure.
pub trait Describe {
    fn describe() -> TypeDescriptor;
}
