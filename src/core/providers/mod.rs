use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Gcp,
}

impl Provider {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "aws" => Some(Self::Aws),
            "gcp" => Some(Self::Gcp),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gcp => "gcp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
        }
    }

    /// All provider variants in display order.
    pub fn all() -> &'static [Provider] {
        &[Provider::Aws, Provider::Gcp]
    }
}

/// Which source column carries the billing entity for one provider.
pub struct EntityMapping {
    pub provider: Provider,
    pub source_field: &'static str,
}

/// Billing-entity column per provider. Onboarding a provider means adding
/// one enum variant and one row here; nothing downstream changes.
static ENTITY_MAPPINGS: &[EntityMapping] = &[
    EntityMapping {
        provider: Provider::Aws,
        source_field: "account_id",
    },
    EntityMapping {
        provider: Provider::Gcp,
        source_field: "project_id",
    },
];

/// Look up the entity mapping for a provider. Returns None for providers
/// without a mapping row.
pub fn entity_mapping(provider: Provider) -> Option<&'static EntityMapping> {
    ENTITY_MAPPINGS.iter().find(|m| m.provider == provider)
}
