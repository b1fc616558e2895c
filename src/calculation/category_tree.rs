//! Transient category tree index.
//!
//! Categories are stored flat with optional parent identifiers. A
//! [`CategoryTree`] is built from that list once per calculation and thrown
//! away afterwards. It answers ancestor chains, descendant closures and
//! depth queries by map lookups.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::warn;

use crate::models::Category;

/// Lookup indices over one job's categories.
///
/// Walks are guarded against malformed parent pointers: a walk that
/// revisits a category stops there instead of looping forever, and a
/// parent identifier that does not resolve ends the walk.
///
/// # Example
///
/// ```
/// use quote_engine::calculation::CategoryTree;
/// use quote_engine::models::Category;
///
/// let category = |id: &str, parent: Option<&str>| Category {
///     id: id.to_string(),
///     job_id: "job-1".to_string(),
///     parent_id: parent.map(str::to_string),
///     name: id.to_string(),
///     surcharge_percent: None,
///     sort_order: 0,
/// };
/// let categories = vec![
///     category("kitchen", None),
///     category("cabinets", Some("kitchen")),
///     category("hardware", Some("cabinets")),
/// ];
///
/// let tree = CategoryTree::new(&categories);
/// let chain: Vec<&str> = tree.chain("hardware").iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(chain, ["kitchen", "cabinets", "hardware"]);
/// assert_eq!(tree.depth("hardware"), 3);
/// assert_eq!(tree.descendants("cabinets").len(), 2);
/// ```
#[derive(Debug)]
pub struct CategoryTree<'a> {
    categories: &'a [Category],
    by_id: HashMap<&'a str, &'a Category>,
    children: HashMap<&'a str, Vec<&'a Category>>,
    roots: Vec<&'a Category>,
}

/// Outcome of following parent pointers upward from a category.
struct AncestorWalk<'a> {
    /// Leaf first.
    categories: Vec<&'a Category>,
    cycle: bool,
}

impl<'a> CategoryTree<'a> {
    /// Builds the id index and the parent to children adjacency.
    pub fn new(categories: &'a [Category]) -> Self {
        let mut by_id = HashMap::with_capacity(categories.len());
        let mut children: HashMap<&'a str, Vec<&'a Category>> = HashMap::new();
        let mut roots = Vec::new();

        for category in categories {
            by_id.insert(category.id.as_str(), category);
            match category.parent_id.as_deref() {
                Some(parent_id) => children.entry(parent_id).or_default().push(category),
                None => roots.push(category),
            }
        }

        roots.sort_by_key(|c| c.sort_order);
        for siblings in children.values_mut() {
            siblings.sort_by_key(|c| c.sort_order);
        }

        Self {
            categories,
            by_id,
            children,
            roots,
        }
    }

    /// Looks up a category by identifier.
    pub fn get(&self, category_id: &str) -> Option<&'a Category> {
        self.by_id.get(category_id).copied()
    }

    /// Returns true if a category with this identifier exists.
    pub fn contains(&self, category_id: &str) -> bool {
        self.by_id.contains_key(category_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.categories.len()
    }

    fn walk_ancestors(&self, category_id: &str) -> AncestorWalk<'a> {
        let mut categories = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.get(category_id);

        while let Some(category) = current {
            if !visited.insert(category.id.as_str()) {
                return AncestorWalk {
                    categories,
                    cycle: true,
                };
            }
            categories.push(category);
            current = category.parent_id.as_deref().and_then(|p| self.get(p));
        }

        AncestorWalk {
            categories,
            cycle: false,
        }
    }

    /// Returns the ancestry of a category, root first and the category itself last.
    ///
    /// An unknown identifier yields an empty chain.
    pub fn chain(&self, category_id: &str) -> Vec<&'a Category> {
        let walk = self.walk_ancestors(category_id);
        if walk.cycle {
            warn!(
                category_id = %category_id,
                "Category parent chain contains a cycle, ancestor walk truncated"
            );
        }
        let mut chain = walk.categories;
        chain.reverse();
        chain
    }

    /// Returns the nesting depth of a category: 1 for top level, 0 if unknown.
    pub fn depth(&self, category_id: &str) -> usize {
        self.walk_ancestors(category_id).categories.len()
    }

    /// Returns true if following parent pointers from this category revisits one.
    pub fn has_cycle(&self, category_id: &str) -> bool {
        self.walk_ancestors(category_id).cycle
    }

    /// Returns the identifiers of a category and all of its descendants.
    ///
    /// The closure is collected breadth first. The target is always included,
    /// even when it is not a known category.
    pub fn descendants<'b>(&self, category_id: &'b str) -> HashSet<&'b str>
    where
        'a: 'b,
    {
        let mut closure = HashSet::new();
        closure.insert(category_id);
        let mut queue = VecDeque::from([category_id]);

        while let Some(current) = queue.pop_front() {
            let Some(children) = self.children.get(current) else {
                continue;
            };
            for &child in children {
                if closure.insert(child.id.as_str()) {
                    queue.push_back(child.id.as_str());
                } else {
                    warn!(
                        category_id = %child.id,
                        "Category reached twice while collecting descendants"
                    );
                }
            }
        }

        closure
    }

    /// Returns every category in display order.
    ///
    /// Top-level categories come first by `sort_order`, each followed by its
    /// subtree in the same order. Categories unreachable from a root (dangling
    /// parent or cycle) are appended in input order.
    pub fn in_display_order(&self) -> Vec<&'a Category> {
        let mut ordered = Vec::with_capacity(self.categories.len());
        let mut seen = HashSet::with_capacity(self.categories.len());
        let mut stack: Vec<&'a Category> = self.roots.iter().rev().copied().collect();

        while let Some(category) = stack.pop() {
            if !seen.insert(category.id.as_str()) {
                continue;
            }
            ordered.push(category);
            if let Some(children) = self.children.get(category.id.as_str()) {
                stack.extend(children.iter().rev().copied());
            }
        }

        for category in self.categories {
            if seen.insert(category.id.as_str()) {
                ordered.push(category);
            }
        }

        ordered
    }
}

/// Per-call cache of category chains, keyed by category identifier.
///
/// Many line items share a category, so each chain is resolved once.
pub(crate) struct ChainCache<'t, 'a> {
    tree: &'t CategoryTree<'a>,
    chains: HashMap<&'a str, Vec<&'a Category>>,
}

impl<'t, 'a> ChainCache<'t, 'a> {
    pub(crate) fn new(tree: &'t CategoryTree<'a>) -> Self {
        Self {
            tree,
            chains: HashMap::new(),
        }
    }

    pub(crate) fn chain(&mut self, category_id: &'a str) -> &[&'a Category] {
        let tree = self.tree;
        self.chains
            .entry(category_id)
            .or_insert_with(|| tree.chain(category_id))
    }

    pub(crate) fn resolved(&self) -> usize {
        self.chains.len()
    }
}
