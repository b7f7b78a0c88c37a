use std::fmt;

/// Semantic kind of a model property
///
/// Each supported C# type spelling belongs to exactly one kind. Anything else
/// (reference types, collections, `Guid`, enums) has no kind and is left out of
/// generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `DateTime`
    DateTime,
    /// `float`, `double` and `decimal`
    Double,
    /// Every signed and unsigned integer width
    Integer,
    /// `string`
    String,
    /// `TimeSpan`
    TimeSpan,
}

impl PropertyKind {
    /// All kinds, in classification order
    pub const ALL: [PropertyKind; 7] = [
        PropertyKind::Boolean,
        PropertyKind::Char,
        PropertyKind::DateTime,
        PropertyKind::Double,
        PropertyKind::Integer,
        PropertyKind::String,
        PropertyKind::TimeSpan,
    ];

    /// Type spellings accepted for this kind: keyword, BCL name and fully qualified name
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            PropertyKind::Boolean => &["bool", "Boolean", "System.Boolean"],
            PropertyKind::Char => &["char", "Char", "System.Char"],
            PropertyKind::DateTime => &["DateTime", "System.DateTime"],
            PropertyKind::Double => &[
                "float",
                "Single",
                "System.Single",
                "double",
                "Double",
                "System.Double",
                "decimal",
                "Decimal",
                "System.Decimal",
            ],
            PropertyKind::Integer => &[
                "short",
                "Int16",
                "System.Int16",
                "int",
                "Int32",
                "System.Int32",
                "long",
                "Int64",
                "System.Int64",
                "byte",
                "Byte",
                "System.Byte",
                "ushort",
                "UInt16",
                "System.UInt16",
                "uint",
                "UInt32",
                "System.UInt32",
                "ulong",
                "UInt64",
                "System.UInt64",
                "sbyte",
                "SByte",
                "System.SByte",
            ],
            PropertyKind::String => &["string", "String", "System.String"],
            PropertyKind::TimeSpan => &["TimeSpan", "System.TimeSpan"],
        }
    }

    /// Classify a declared type spelling
    ///
    /// A trailing nullable marker (`int?`) is ignored. Returns `None` for any
    /// type outside the supported set.
    pub fn classify(declared_type: &str) -> Option<PropertyKind> {
        let spelling = declared_type.trim();
        let spelling = spelling.strip_suffix('?').unwrap_or(spelling).trim_end();
        PropertyKind::ALL
            .into_iter()
            .find(|kind| kind.spellings().contains(&spelling))
    }

    /// A C# literal for this kind that is unique per `index`
    ///
    /// The value depends only on `index`, so generated tests are reproducible.
    pub fn sample_value(self, index: u32) -> String {
        match self {
            PropertyKind::Boolean => (index % 2 == 1).to_string(),
            PropertyKind::Char => {
                let letter = char::from(b'a' + (index % 26) as u8);
                format!("'{letter}'")
            }
            PropertyKind::DateTime => {
                format!("new DateTime(2020, 1, 1, {}, 0, 0)", index % 24)
            }
            PropertyKind::Double | PropertyKind::Integer => index.to_string(),
            PropertyKind::String => format!("\"{index}\""),
            PropertyKind::TimeSpan => format!("new TimeSpan({}, 0, 0)", index % 24),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::Char => "char",
            PropertyKind::DateTime => "date-time",
            PropertyKind::Double => "floating-point",
            PropertyKind::Integer => "integer",
            PropertyKind::String => "string",
            PropertyKind::TimeSpan => "time-span",
        };
        f.write_str(name)
    }
}

/// A classified model property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    declared_type: String,
    kind: PropertyKind,
}

impl PropertyDescriptor {
    /// Build a descriptor, or `None` when the type is not supported
    pub fn classify(name: impl Into<String>, declared_type: impl Into<String>) -> Option<Self> {
        let declared_type = declared_type.into();
        let kind = PropertyKind::classify(&declared_type)?;
        Some(PropertyDescriptor {
            name: name.into(),
            declared_type,
            kind,
        })
    }

    /// Property name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type spelling as declared, e.g. `int` or `System.Int32`
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Semantic kind
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Shorthand for `self.kind().sample_value(index)`
    pub fn sample_value(&self, index: u32) -> String {
        self.kind.sample_value(index)
    }

    /// A C# expression deriving a value from the integer variable `var`
    ///
    /// Used where generated tests need a fresh value on every call rather than
    /// a literal, e.g. `(int)index` or `$"Title {index}"`.
    pub fn sequence_value(&self, var: &str) -> String {
        match self.kind {
            PropertyKind::Boolean => format!("{var} % 2 == 1"),
            PropertyKind::Char => format!("(char)('a' + {var} % 26)"),
            PropertyKind::DateTime => format!("new DateTime(2020, 1, 1, {var} % 24, 0, 0)"),
            PropertyKind::Double | PropertyKind::Integer => {
                format!("({}){var}", self.declared_type)
            }
            PropertyKind::String => format!("$\"{} {{{var}}}\"", self.name),
            PropertyKind::TimeSpan => format!("new TimeSpan({var} % 24, 0, 0)"),
        }
    }

    /// True for `CreatedAt`/`UpdatedAt` date-time properties, which services stamp themselves
    pub fn is_auto_timestamp(&self) -> bool {
        self.kind == PropertyKind::DateTime && matches!(self.name.as_str(), "CreatedAt" | "UpdatedAt")
    }
}
