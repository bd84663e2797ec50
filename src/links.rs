//! Link Normalization
//!
//! Exported documents split one hyperlink into several adjacent anchors
//! whenever the formatting inside it changes, and mark embedded comments with
//! anchors whose id starts with `cmnt`. This pass merges the former and drops
//! the latter.
//!
//! Merged anchors are not detached while siblings are being walked; they go
//! into a [`Blacklist`] and are detached later during the body pass.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::options::Options;
use crate::url_utils::{is_direct_link, resolve_redirect};

/// Anchors consumed by a merge and waiting to be detached.
#[derive(Debug, Default, Clone)]
pub struct Blacklist {
    nodes: HashSet<NodeId>,
}

impl Blacklist {
    pub fn insert(&mut self, id: NodeId) {
        self.nodes.insert(id);
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Remove `id` from the blacklist, returning whether it was present.
    ///
    /// Each node can be taken once, so each is detached once.
    pub fn take(&mut self, id: NodeId) -> bool {
        self.nodes.remove(&id)
    }

    /// Remaining entries, emptying the blacklist.
    pub fn drain(&mut self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.drain()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The destination an href actually points to.
///
/// Redirect-wrapped hrefs resolve to their target. Anything else is `None`,
/// unless `keep_direct_links` is set and the href is already absolute.
#[must_use]
pub fn real_href(href: &str, options: &Options) -> Option<String> {
    resolve_redirect(href, &options.redirect_param).or_else(|| {
        (options.keep_direct_links && is_direct_link(href)).then(|| href.trim().to_string())
    })
}

fn anchor_target(anchor: &NodeRef, options: &Options) -> Option<String> {
    dom::get_attribute(anchor, "href").and_then(|href| real_href(&href, options))
}

/// Whether an anchor marks an embedded document comment.
#[must_use]
pub fn is_comment_anchor(anchor: &NodeRef, prefix: &str) -> bool {
    dom::is_tag(anchor, "a")
        && dom::get_attribute(anchor, "id").is_some_and(|id| id.starts_with(prefix))
}

/// Drop comment threads and merge adjacent same-target anchors.
///
/// Returns the anchors consumed by merges; they are still attached.
pub fn normalize_links(doc: &Document, options: &Options) -> Blacklist {
    let mut blacklist = Blacklist::default();
    let mut comments = 0;

    for anchor in dom::get_elements_by_tag_name(doc, "a") {
        if !dom::is_attached(&anchor) || blacklist.contains(anchor.id) {
            continue;
        }

        if is_comment_anchor(&anchor, &options.comment_id_prefix) {
            if let Some(parent) = anchor.parent().filter(NodeRef::is_element) {
                dom::remove(&parent);
                comments += 1;
            }
            continue;
        }

        merge_following(&anchor, &mut blacklist, options);
    }

    debug!(comments, merged = blacklist.len(), "normalized links");
    blacklist
}

/// Absorb the text of directly following anchors with the same destination.
///
/// Only immediate siblings are considered; any node in between, including
/// whitespace text, stops the merge. Unresolvable targets never merge.
fn merge_following(anchor: &NodeRef, blacklist: &mut Blacklist, options: &Options) {
    let Some(target) = anchor_target(anchor, options) else {
        return;
    };

    let mut next = anchor.next_sibling();
    while let Some(sibling) = next {
        if !dom::is_tag(&sibling, "a") || anchor_target(&sibling, options).as_deref() != Some(target.as_str()) {
            break;
        }

        dom::append_text(anchor, &sibling.text());
        blacklist.insert(sibling.id);

        next = sibling.next_sibling();
    }
}
