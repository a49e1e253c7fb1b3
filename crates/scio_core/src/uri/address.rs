//! Parsed entity address.
//!
//! # Invariants
//! - `Address` values are only constructed by `Address::parse`.
//! - `raw` is kept verbatim and is the canonical string form.

use super::entity_kind::EntityKind;
use super::pattern::ADDRESS_PATTERNS;
use super::SCHEME;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type AddressResult<T> = Result<T, AddressError>;

/// Address parsing and navigation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Raw string does not match any known `scio://` shape.
    Syntax(String),
    /// Global tags/relations and contexts have no parent entity.
    NoParent(String),
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(raw) => write!(f, "`{raw}` does not match any known scio:// URI pattern"),
            Self::NoParent(raw) => write!(f, "entity `{raw}` doesn't have a parent"),
        }
    }
}

impl Error for AddressError {}

/// Hierarchy position of an addressed entity.
///
/// One variant per entity kind so callers can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressTarget {
    Tag {
        context: Option<String>,
        slug: String,
    },
    Relation {
        context: Option<String>,
        slug: String,
    },
    Context {
        slug: String,
    },
    Domain {
        context: String,
        slug: String,
    },
    Concept {
        context: String,
        domain: String,
        slug: String,
    },
}

/// Typed `scio://` address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    raw: String,
    target: AddressTarget,
}

impl Address {
    /// Parses a raw URI against the known address shapes.
    ///
    /// # Errors
    /// - `AddressError::Syntax` when no shape matches the whole input.
    pub fn parse(raw: &str) -> AddressResult<Self> {
        for pattern in ADDRESS_PATTERNS.iter() {
            let Some(caps) = pattern.re.captures(raw) else {
                continue;
            };

            let context = pattern.has_context.then(|| caps[1].to_string());
            let domain = pattern.has_domain.then(|| caps[2].to_string());
            let slug = caps[caps.len() - 1].to_string();

            let target = match (pattern.kind, context, domain) {
                (EntityKind::Tag, context, None) => AddressTarget::Tag { context, slug },
                (EntityKind::Relation, context, None) => {
                    AddressTarget::Relation { context, slug }
                }
                (EntityKind::Context, None, None) => AddressTarget::Context { slug },
                (EntityKind::Domain, Some(context), None) => {
                    AddressTarget::Domain { context, slug }
                }
                (EntityKind::Concept, Some(context), Some(domain)) => AddressTarget::Concept {
                    context,
                    domain,
                    slug,
                },
                _ => unreachable!("address pattern table declares an impossible hierarchy"),
            };

            return Ok(Self {
                raw: raw.to_string(),
                target,
            });
        }

        Err(AddressError::Syntax(raw.to_string()))
    }

    /// Original string this address was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn target(&self) -> &AddressTarget {
        &self.target
    }

    pub fn kind(&self) -> EntityKind {
        match self.target {
            AddressTarget::Tag { .. } => EntityKind::Tag,
            AddressTarget::Relation { .. } => EntityKind::Relation,
            AddressTarget::Context { .. } => EntityKind::Context,
            AddressTarget::Domain { .. } => EntityKind::Domain,
            AddressTarget::Concept { .. } => EntityKind::Concept,
        }
    }

    /// Slug of the owning context, if the entity is context-scoped.
    pub fn context_slug(&self) -> Option<&str> {
        match &self.target {
            AddressTarget::Tag { context, .. } | AddressTarget::Relation { context, .. } => {
                context.as_deref()
            }
            AddressTarget::Context { .. } => None,
            AddressTarget::Domain { context, .. } | AddressTarget::Concept { context, .. } => {
                Some(context)
            }
        }
    }

    /// Slug of the owning domain. Only concepts have one.
    pub fn domain_slug(&self) -> Option<&str> {
        match &self.target {
            AddressTarget::Concept { domain, .. } => Some(domain),
            _ => None,
        }
    }

    /// Final path segment identifying the entity within its scope.
    pub fn slug(&self) -> &str {
        match &self.target {
            AddressTarget::Tag { slug, .. }
            | AddressTarget::Relation { slug, .. }
            | AddressTarget::Context { slug }
            | AddressTarget::Domain { slug, .. }
            | AddressTarget::Concept { slug, .. } => slug,
        }
    }

    /// Returns the URI of the entity that owns this one.
    ///
    /// Concepts are owned by their domain; every other context-scoped entity
    /// is owned by its context.
    ///
    /// # Errors
    /// - `AddressError::NoParent` for global tags/relations and contexts.
    pub fn parent_uri(&self) -> AddressResult<String> {
        match &self.target {
            AddressTarget::Concept {
                context, domain, ..
            } => Ok(format!("{SCHEME}contexts/{context}/domains/{domain}")),
            _ => match self.context_slug() {
                Some(context) => Ok(format!("{SCHEME}contexts/{context}")),
                None => Err(AddressError::NoParent(self.raw.clone())),
            },
        }
    }

    /// Parsed form of `parent_uri`.
    pub fn parent(&self) -> AddressResult<Address> {
        Address::parse(&self.parent_uri()?)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}
