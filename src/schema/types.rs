//! Schema building blocks

/// How an empty column value shows up in a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always present, never null
    Required,
    /// Always present, `null` when empty (SQL query results)
    Nullable,
    /// Omitted when empty (row-listing endpoint)
    Optional,
    /// Either omitted or `null`
    OptionalNullable,
}

/// Extra constraint on a string value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFormat {
    #[default]
    Plain,
    Email,
    Url,
}

/// Shape of a present, non-empty value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String(StringFormat),
    Number,
    Boolean,
    /// Only `null` is accepted
    Null,
    /// A string from a closed set of options
    OneOf(Vec<String>),
    Array(Box<FieldKind>),
    /// An object with the listed fields; other keys are ignored
    Object(Vec<(String, FieldSchema)>),
}

impl FieldKind {
    pub fn string() -> Self {
        FieldKind::String(StringFormat::Plain)
    }

    pub fn array_of(item: FieldKind) -> Self {
        FieldKind::Array(Box::new(item))
    }

    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::OneOf(options.into_iter().map(Into::into).collect())
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldSchema)>,
        S: Into<String>,
    {
        FieldKind::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Validator for one column: a value shape plus its empty representation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    kind: FieldKind,
    presence: Presence,
}

impl FieldSchema {
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Required,
        }
    }

    pub fn nullable(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Nullable,
        }
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
        }
    }

    pub fn optional_nullable(kind: FieldKind) -> Self {
        Self {
            kind,
            presence: Presence::OptionalNullable,
        }
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Same value shape with a different empty representation
    #[must_use]
    pub fn with_presence(self, presence: Presence) -> Self {
        Self { presence, ..self }
    }
}
