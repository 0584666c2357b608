use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::OneOrMany;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Module,
    Type,
    Method,
    Property,
    Event,
    Field,
    Parameter,
    ReturnSlot,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Type => "type",
            Self::Method => "method",
            Self::Property => "property",
            Self::Event => "event",
            Self::Field => "field",
            Self::Parameter => "parameter",
            Self::ReturnSlot => "return_slot",
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(
            self,
            Self::Method | Self::Property | Self::Event | Self::Field
        )
    }

    /// Kinds that can take part in an override relation.
    pub fn is_overridable(&self) -> bool {
        matches!(self, Self::Method | Self::Property | Self::Event)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

bitflags! {
    /// Declaration kinds a directive may land on.
    #[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TargetKinds: u16 {
        const MODULE = 1 << 0;
        const TYPE = 1 << 1;
        const METHOD = 1 << 2;
        const PROPERTY = 1 << 3;
        const EVENT = 1 << 4;
        const FIELD = 1 << 5;
        const PARAMETER = 1 << 6;
        const RETURN_SLOT = 1 << 7;

        const MEMBERS = Self::METHOD.bits()
            | Self::PROPERTY.bits()
            | Self::EVENT.bits()
            | Self::FIELD.bits();
        const ALL = Self::MODULE.bits()
            | Self::TYPE.bits()
            | Self::MEMBERS.bits()
            | Self::PARAMETER.bits()
            | Self::RETURN_SLOT.bits();
    }
}

impl TargetKinds {
    pub fn of(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Module => Self::MODULE,
            DeclKind::Type => Self::TYPE,
            DeclKind::Method => Self::METHOD,
            DeclKind::Property => Self::PROPERTY,
            DeclKind::Event => Self::EVENT,
            DeclKind::Field => Self::FIELD,
            DeclKind::Parameter => Self::PARAMETER,
            DeclKind::ReturnSlot => Self::RETURN_SLOT,
        }
    }

    /// Kinds that can appear anywhere in the containment subtree below `kind`.
    pub fn below(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Module | DeclKind::Type => {
                Self::TYPE | Self::MEMBERS | Self::PARAMETER | Self::RETURN_SLOT
            }
            DeclKind::Property | DeclKind::Event => {
                Self::METHOD | Self::PARAMETER | Self::RETURN_SLOT
            }
            DeclKind::Method => Self::PARAMETER | Self::RETURN_SLOT,
            DeclKind::Field | DeclKind::Parameter | DeclKind::ReturnSlot => Self::empty(),
        }
    }

    pub fn from_keyword(name: &str) -> Option<Self> {
        let kinds = match name.to_ascii_lowercase().as_str() {
            "module" => Self::MODULE,
            "type" => Self::TYPE,
            "method" => Self::METHOD,
            "property" => Self::PROPERTY,
            "event" => Self::EVENT,
            "field" => Self::FIELD,
            "parameter" => Self::PARAMETER,
            "return_slot" | "return" => Self::RETURN_SLOT,
            "members" => Self::MEMBERS,
            "all" => Self::ALL,
            _ => return None,
        };
        Some(kinds)
    }

    pub fn from_names<'a, I>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().try_fold(Self::empty(), |acc, name| {
            Self::from_keyword(name)
                .map(|kinds| acc | kinds)
                .ok_or_else(|| format!("unknown target kind '{name}'"))
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        [
            DeclKind::Module,
            DeclKind::Type,
            DeclKind::Method,
            DeclKind::Property,
            DeclKind::Event,
            DeclKind::Field,
            DeclKind::Parameter,
            DeclKind::ReturnSlot,
        ]
        .into_iter()
        .filter(|kind| self.contains(Self::of(*kind)))
        .map(|kind| kind.as_str())
        .collect()
    }
}

impl<'de> Deserialize<'de> for TargetKinds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = OneOrMany::deserialize(deserializer)?;
        Self::from_names(raw.names()).map_err(serde::de::Error::custom)
    }
}
