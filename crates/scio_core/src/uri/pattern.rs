//! Ordered URI shape table.
//!
//! Shapes are tried in a fixed order and the first full match wins. Valid
//! shapes never overlap, so the order only matters for rejecting input.

use super::entity_kind::EntityKind;
use super::SCHEME;
use once_cell::sync::Lazy;
use regex::Regex;

/// One recognized address shape.
pub(super) struct AddressPattern {
    pub(super) re: Regex,
    pub(super) kind: EntityKind,
    pub(super) has_context: bool,
    pub(super) has_domain: bool,
}

const SLUG: &str = "([a-z][a-z0-9-]*)";

fn pattern(shape: &str, kind: EntityKind, has_context: bool, has_domain: bool) -> AddressPattern {
    let source = format!(
        "^{}{}$",
        regex::escape(SCHEME),
        shape.replace("{slug}", SLUG)
    );
    AddressPattern {
        re: Regex::new(&source).expect("valid address pattern"),
        kind,
        has_context,
        has_domain,
    }
}

pub(super) static ADDRESS_PATTERNS: Lazy<Vec<AddressPattern>> = Lazy::new(|| {
    vec![
        pattern("tags/{slug}", EntityKind::Tag, false, false),
        pattern("contexts/{slug}/tags/{slug}", EntityKind::Tag, true, false),
        pattern("relations/{slug}", EntityKind::Relation, false, false),
        pattern(
            "contexts/{slug}/relations/{slug}",
            EntityKind::Relation,
            true,
            false,
        ),
        pattern(
            "contexts/{slug}/domains/{slug}/concepts/{slug}",
            EntityKind::Concept,
            true,
            true,
        ),
        pattern("contexts/{slug}/domains/{slug}", EntityKind::Domain, true, false),
        pattern("contexts/{slug}", EntityKind::Context, false, false),
    ]
});
