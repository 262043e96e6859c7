//! Object-property relation roles
//!
//! The display name of an object property decides how a reference to
//! another class is rendered as a protobuf field.

use owl2proto_ir::naming::{to_plural, to_snake_case};
use std::fmt;

/// How an object property is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationRole {
    /// Many targets (`hasMultiple`, `offersMultiple`, `to`, `collectionOf`)
    Repeated,
    /// At most one target (`has`, `runsOn`, `offers`, `storage`,
    /// `offersInterface` and any unknown relation)
    Single,
    /// Alias of another resource, rendered as a bare string
    ProxyTarget,
    /// Synthetic `optional string parent_id`
    ParentId,
}

impl RelationRole {
    /// Classify a relation by its display name
    pub fn resolve(property_name: &str) -> Self {
        match property_name {
            "hasMultiple" | "offersMultiple" | "to" | "collectionOf" => Self::Repeated,
            "has" | "runsOn" | "offers" | "storage" | "offersInterface" => Self::Single,
            "proxyTarget" => Self::ProxyTarget,
            "parent" => Self::ParentId,
            _ => Self::Single,
        }
    }

    /// Field for a reference to `target_name`.
    ///
    /// `target_below_root` is true when the target is the root resource or
    /// one of its descendants; such references hold identifiers instead
    /// of embedded messages.
    pub fn field(self, target_name: &str, target_below_root: bool) -> ObjectField {
        match self {
            Self::ProxyTarget => ObjectField::new(None, "string", to_snake_case(target_name)),
            Self::ParentId => ObjectField::new(Some(Label::Optional), "string", "parent_id"),
            Self::Single if target_below_root => ObjectField::new(
                Some(Label::Optional),
                "string",
                to_snake_case(&format!("{target_name}_id")),
            ),
            Self::Repeated if target_below_root => ObjectField::new(
                Some(Label::Repeated),
                "string",
                to_snake_case(&format!("{target_name}_ids")),
            ),
            Self::Single => ObjectField::new(None, target_name, to_snake_case(target_name)),
            Self::Repeated => ObjectField::new(
                Some(Label::Repeated),
                target_name,
                to_snake_case(&to_plural(target_name)),
            ),
        }
    }
}

/// Protobuf field label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Optional,
    Repeated,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => f.write_str("optional"),
            Self::Repeated => f.write_str("repeated"),
        }
    }
}

/// A rendered object field without its number, e.g. `repeated string block_storage_ids`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectField {
    pub label: Option<Label>,
    pub type_name: String,
    pub name: String,
}

impl ObjectField {
    fn new(label: Option<Label>, type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            label,
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.label {
            write!(f, "{label} ")?;
        }
        write!(f, "{} {}", self.type_name, self.name)
    }
}
