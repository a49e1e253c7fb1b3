//! Address to file-system location mapping.
//!
//! | kind     | scope          | path under root                               |
//! |----------|----------------|-----------------------------------------------|
//! | tag      | global         | `tags/<slug>.md`                              |
//! | tag      | context        | `contexts/<ctx>/tags/<slug>.md`               |
//! | relation | global         | `relations/<slug>.md`                         |
//! | relation | context        | `contexts/<ctx>/relations/<slug>.md`          |
//! | context  | -              | `contexts/<slug>/context.md`                  |
//! | domain   | context        | `contexts/<ctx>/domains/<slug>/domain.md`     |
//! | concept  | context+domain | `contexts/<ctx>/domains/<dom>/<slug>.md`      |

use crate::uri::{Address, AddressTarget};
use std::path::{Path, PathBuf};

pub const TAGS_DIR: &str = "tags";
pub const RELATIONS_DIR: &str = "relations";
pub const CONTEXTS_DIR: &str = "contexts";
pub const DOMAINS_DIR: &str = "domains";
pub const ENTITY_FILE_EXTENSION: &str = "md";

const CONTEXT_FILE_NAME: &str = "context.md";
const DOMAIN_FILE_NAME: &str = "domain.md";

/// Top-level containers created under every store root.
pub const ROOT_DIRS: [&str; 3] = [TAGS_DIR, RELATIONS_DIR, CONTEXTS_DIR];

fn entity_file(slug: &str) -> String {
    format!("{slug}.{ENTITY_FILE_EXTENSION}")
}

/// Returns the file that stores the entity named by `address`.
pub fn file_path(root: &Path, address: &Address) -> PathBuf {
    match address.target() {
        AddressTarget::Tag {
            context: None,
            slug,
        } => root.join(TAGS_DIR).join(entity_file(slug)),
        AddressTarget::Tag {
            context: Some(context),
            slug,
        } => root
            .join(CONTEXTS_DIR)
            .join(context)
            .join(TAGS_DIR)
            .join(entity_file(slug)),
        AddressTarget::Relation {
            context: None,
            slug,
        } => root.join(RELATIONS_DIR).join(entity_file(slug)),
        AddressTarget::Relation {
            context: Some(context),
            slug,
        } => root
            .join(CONTEXTS_DIR)
            .join(context)
            .join(RELATIONS_DIR)
            .join(entity_file(slug)),
        AddressTarget::Context { slug } => {
            root.join(CONTEXTS_DIR).join(slug).join(CONTEXT_FILE_NAME)
        }
        AddressTarget::Domain { context, slug } => root
            .join(CONTEXTS_DIR)
            .join(context)
            .join(DOMAINS_DIR)
            .join(slug)
            .join(DOMAIN_FILE_NAME),
        AddressTarget::Concept {
            context,
            domain,
            slug,
        } => root
            .join(CONTEXTS_DIR)
            .join(context)
            .join(DOMAINS_DIR)
            .join(domain)
            .join(entity_file(slug)),
    }
}

/// Directory containing `file_path(root, address)`.
///
/// For contexts and domains this is the directory owning all descendants.
pub fn file_dir(root: &Path, address: &Address) -> PathBuf {
    let path = file_path(root, address);
    match path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => root.to_path_buf(),
    }
}
