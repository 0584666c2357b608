use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};

use super::OneOrMany;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Protected,
    Internal,
    ProtectedAndInternal,
    ProtectedOrInternal,
    #[default]
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamDirection {
    #[default]
    In,
    Out,
    Ref,
}

bitflags! {
    /// Classification of a declaration, and the masks directives compare it against.
    ///
    /// Bits come in groups (visibility, scope, abstraction, virtuality, generation,
    /// parameter direction). A classification carries at least one bit of every group;
    /// a mask that leaves a group empty does not constrain it.
    #[derive(Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Qualifiers: u32 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const INTERNAL = 1 << 2;
        const PROTECTED_AND_INTERNAL = 1 << 3;
        const PROTECTED_OR_INTERNAL = 1 << 4;
        const PUBLIC = 1 << 5;

        const STATIC = 1 << 6;
        const INSTANCE = 1 << 7;

        const ABSTRACT = 1 << 8;
        const NON_ABSTRACT = 1 << 9;

        const VIRTUAL = 1 << 10;
        const NON_VIRTUAL = 1 << 11;

        const GENERATED = 1 << 12;
        const USER = 1 << 13;

        const IN = 1 << 14;
        const OUT = 1 << 15;
        const REF = 1 << 16;

        const ANY_VISIBILITY = Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::INTERNAL.bits()
            | Self::PROTECTED_AND_INTERNAL.bits()
            | Self::PROTECTED_OR_INTERNAL.bits()
            | Self::PUBLIC.bits();
        const ANY_SCOPE = Self::STATIC.bits() | Self::INSTANCE.bits();
        const ANY_ABSTRACTION = Self::ABSTRACT.bits() | Self::NON_ABSTRACT.bits();
        const ANY_VIRTUALITY = Self::VIRTUAL.bits() | Self::NON_VIRTUAL.bits();
        const ANY_GENERATION = Self::GENERATED.bits() | Self::USER.bits();
        const ANY_DIRECTION = Self::IN.bits() | Self::OUT.bits() | Self::REF.bits();
    }
}

impl Qualifiers {
    pub const GROUPS: [Qualifiers; 6] = [
        Qualifiers::ANY_VISIBILITY,
        Qualifiers::ANY_SCOPE,
        Qualifiers::ANY_ABSTRACTION,
        Qualifiers::ANY_VIRTUALITY,
        Qualifiers::ANY_GENERATION,
        Qualifiers::ANY_DIRECTION,
    ];

    pub fn from_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Private => Self::PRIVATE,
            Visibility::Protected => Self::PROTECTED,
            Visibility::Internal => Self::INTERNAL,
            Visibility::ProtectedAndInternal => Self::PROTECTED_AND_INTERNAL,
            Visibility::ProtectedOrInternal => Self::PROTECTED_OR_INTERNAL,
            Visibility::Public => Self::PUBLIC,
        }
    }

    pub fn from_direction(direction: ParamDirection) -> Self {
        match direction {
            ParamDirection::In => Self::IN,
            ParamDirection::Out => Self::OUT,
            ParamDirection::Ref => Self::REF,
        }
    }

    /// Fills every group the mask leaves empty. An empty generation group only
    /// admits user code; generated code has to be asked for.
    pub fn normalized(self) -> Self {
        Self::GROUPS.iter().fold(self, |mask, &group| {
            if mask.intersects(group) {
                mask
            } else if group == Self::ANY_GENERATION {
                mask | Self::USER
            } else {
                mask | group
            }
        })
    }

    /// True when every group holds at least one bit.
    pub fn is_classification(self) -> bool {
        Self::GROUPS.iter().all(|&group| self.intersects(group))
    }

    pub fn accepts(self, classification: Qualifiers) -> bool {
        let mask = self.normalized();
        Self::GROUPS
            .iter()
            .all(|&group| mask.intersects(classification & group))
    }

    pub fn from_keyword(name: &str) -> Option<Self> {
        let bits = match name.to_ascii_lowercase().as_str() {
            "private" => Self::PRIVATE,
            "protected" => Self::PROTECTED,
            "internal" => Self::INTERNAL,
            "protected_and_internal" => Self::PROTECTED_AND_INTERNAL,
            "protected_or_internal" => Self::PROTECTED_OR_INTERNAL,
            "public" => Self::PUBLIC,
            "static" => Self::STATIC,
            "instance" => Self::INSTANCE,
            "abstract" => Self::ABSTRACT,
            "non_abstract" => Self::NON_ABSTRACT,
            "virtual" => Self::VIRTUAL,
            "non_virtual" => Self::NON_VIRTUAL,
            "generated" => Self::GENERATED,
            "user" => Self::USER,
            "in" => Self::IN,
            "out" => Self::OUT,
            "ref" => Self::REF,
            "any_visibility" => Self::ANY_VISIBILITY,
            "any_scope" => Self::ANY_SCOPE,
            "any_abstraction" => Self::ANY_ABSTRACTION,
            "any_virtuality" => Self::ANY_VIRTUALITY,
            "any_generation" => Self::ANY_GENERATION,
            "any_direction" => Self::ANY_DIRECTION,
            "any" => Self::all(),
            _ => return None,
        };
        Some(bits)
    }

    pub fn from_names<'a, I>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().try_fold(Self::empty(), |acc, name| {
            Self::from_keyword(name)
                .map(|bits| acc | bits)
                .ok_or_else(|| format!("unknown qualifier '{name}'"))
        })
    }
}

impl<'de> Deserialize<'de> for Qualifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = OneOrMany::deserialize(deserializer)?;
        Self::from_names(raw.names()).map_err(serde::de::Error::custom)
    }
}
