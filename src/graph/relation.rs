use serde::Deserialize;

use super::{EdgeId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Subclass,
    Superclass,
    Instance,
    Class,
    Property,
    ObjProperty,
    DataProperty,
    Comment,
    Undefined,
}

impl RelationType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Subclass => "subclass",
            Self::Superclass => "superclass",
            Self::Instance => "instance",
            Self::Class => "class",
            Self::Property => "property",
            Self::ObjProperty => "object property",
            Self::DataProperty => "data property",
            Self::Comment => "comment",
            Self::Undefined => "undefined",
        }
    }

    /// Back-relations synthesized for reciprocity carry no text of their own.
    pub fn label_visible(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    pub fn inverse(self) -> Option<Self> {
        match self {
            Self::Subclass => Some(Self::Superclass),
            Self::Superclass => Some(Self::Subclass),
            Self::Instance => Some(Self::Class),
            Self::Class => Some(Self::Instance),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RelationRef {
    pub node: NodeId,
    pub index: usize,
}

#[derive(Clone, Debug)]
pub struct NodeRelation {
    pub from: NodeId,
    pub to: NodeId,
    pub relation_type: RelationType,
    pub label: String,
    pub edge: EdgeId,
}

impl NodeRelation {
    pub fn display_label(&self) -> &str {
        if !self.relation_type.label_visible() {
            return "";
        }
        if self.label.is_empty() {
            self.relation_type.label()
        } else {
            &self.label
        }
    }
}
