//! Document model: an arena of tag nodes addressed by [`NodeId`].
//!
//! The document owns every node. Children are held as ordered id lists and
//! the parent link is a plain id, so upward navigation never owns anything.
//! Top-level nodes have no parent; their level is 0. The `HEAD` node is kept
//! apart from the record list, and the trailer is implied.
//!
//! The cross-reference index lives in the document and is updated by every
//! operation that adds or removes a top-level node.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::date::DateValue;
use crate::line::{pointer_target, unescape_value, Continuation};
use crate::tags::{NodeKind, RecordKind, TagRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    xref: Option<String>,
    value: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Source line, 0 for nodes created in memory.
    line: u32,
    /// Value was written with `@@` escapes, so it is text even when it
    /// looks like a pointer.
    escaped: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    header: Option<NodeId>,
    records: Vec<NodeId>,
    index: HashMap<String, NodeId>,
    registry: TagRegistry,
}

fn strip_at(xref: &str) -> &str {
    let xref = xref.strip_prefix('@').unwrap_or(xref);
    xref.strip_suffix('@').unwrap_or(xref)
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn with_registry(registry: TagRegistry) -> Self {
        Document {
            registry,
            ..Document::default()
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Handle for a node id. Ids are only meaningful for the document that
    /// issued them.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| self.node(id))
    }

    pub fn header(&self) -> Option<NodeRef<'_>> {
        self.header.map(|id| self.node(id))
    }

    /// Top-level records in document order.
    pub fn records(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.records.iter().map(move |id| self.node(*id))
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Look up a record by cross-reference, with or without the `@` marks.
    pub fn find_record(&self, xref: &str) -> Option<NodeRef<'_>> {
        self.index.get(strip_at(xref)).map(|id| self.node(*id))
    }

    pub fn contains_xref(&self, xref: &str) -> bool {
        self.index.contains_key(strip_at(xref))
    }

    /// Record named by a pointer value.
    pub fn resolve(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.node(id).pointer().and_then(|x| self.find_record(x))
    }

    /// The record and every record reachable from it through pointers,
    /// breadth first.
    pub fn linked_records(&self, xref: &str) -> Vec<NodeRef<'_>> {
        let Some(start) = self.find_record(xref) else {
            return Vec::new();
        };
        let mut seen = HashSet::from([start.id]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(record) = queue.pop_front() {
            out.push(record);
            for node in record.subtree() {
                if let Some(target) = self.resolve(node.id) {
                    if seen.insert(target.id) {
                        queue.push_back(target);
                    }
                }
            }
        }
        out
    }

    /// Header then records, each subtree in pre-order.
    pub fn walk(&self) -> Vec<NodeRef<'_>> {
        self.header()
            .into_iter()
            .chain(self.records())
            .flat_map(|top| top.subtree())
            .collect()
    }

    // ── Editing ─────────────────────────────────────────────────────

    fn alloc(
        &mut self,
        tag: &str,
        xref: Option<&str>,
        value: String,
        parent: Option<NodeId>,
        line: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_ascii_uppercase(),
            xref: xref.map(str::to_string),
            value,
            kind: NodeKind::Generic,
            parent,
            children: Vec::new(),
            line,
            escaped: false,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    fn derive_kind(&mut self, id: NodeId) {
        let level = self.node(id).level();
        let data = &self.nodes[id.0];
        let kind = self.registry.construct(&data.tag, level, &data.value);
        self.nodes[id.0].kind = kind;
    }

    /// Append a child tag. A `CONT` / `CONC` tag is folded into the
    /// parent's value instead, and the parent's id is returned.
    pub fn add_tag(&mut self, parent: NodeId, tag: &str, value: &str) -> NodeId {
        if let Some(c) = Continuation::from_tag(tag) {
            let mut joined = self.nodes[parent.0].value.clone();
            c.fold_into(&mut joined, value);
            self.set_value(parent, &joined);
            return parent;
        }
        let id = self.alloc(tag, None, value.to_string(), Some(parent), 0);
        self.derive_kind(id);
        id
    }

    /// Replace a node's value and re-derive its payload.
    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.nodes[id.0].value = value.to_string();
        self.nodes[id.0].escaped = false;
        self.derive_kind(id);
    }

    /// Write a date value and its text together.
    pub fn set_date(&mut self, id: NodeId, date: &DateValue) {
        let data = &mut self.nodes[id.0];
        data.value = date.to_string();
        data.escaped = false;
        data.kind = NodeKind::Date(date.clone());
    }

    /// Detach a node and its subtree. Removing a record also drops its
    /// index entry. Pointers to it elsewhere are left alone.
    pub fn remove_tag(&mut self, id: NodeId) -> bool {
        match self.nodes.get(id.0).map(|d| d.parent) {
            None => false,
            Some(Some(parent)) => {
                let siblings = &mut self.nodes[parent.0].children;
                let before = siblings.len();
                siblings.retain(|c| *c != id);
                let removed = siblings.len() != before;
                if removed {
                    self.nodes[id.0].parent = None;
                }
                removed
            }
            Some(None) if self.header == Some(id) => {
                self.header = None;
                true
            }
            Some(None) => {
                let before = self.records.len();
                self.records.retain(|r| *r != id);
                if let Some(xref) = self.nodes[id.0].xref.as_deref() {
                    if self.index.get(xref) == Some(&id) {
                        self.index.remove(xref);
                    }
                }
                self.records.len() != before
            }
        }
    }

    pub fn remove_record(&mut self, xref: &str) -> bool {
        match self.index.get(strip_at(xref)).copied() {
            Some(id) => self.remove_tag(id),
            None => false,
        }
    }

    fn next_xref(&self, prefix: &str) -> String {
        (1u64..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|x| !self.index.contains_key(x))
            .unwrap_or_else(|| prefix.to_string())
    }

    /// Append an empty record with the next free cross-reference for its
    /// kind (`I1`, `F3`, `SUB1`, ...).
    pub fn create_record(&mut self, kind: RecordKind) -> NodeId {
        let xref = self.next_xref(kind.xref_prefix());
        let id = self.alloc(kind.tag(), Some(&xref), String::new(), None, 0);
        self.nodes[id.0].kind = NodeKind::Record(kind);
        self.records.push(id);
        self.index.insert(xref, id);
        id
    }

    /// The `HEAD` node, created when missing.
    pub fn ensure_header(&mut self) -> NodeId {
        match self.header {
            Some(id) => id,
            None => {
                let id = self.alloc("HEAD", None, String::new(), None, 0);
                self.header = Some(id);
                id
            }
        }
    }

    // ── Builder support ─────────────────────────────────────────────

    /// Attach a top-level line. The caller has already rejected duplicate
    /// cross-references.
    pub(crate) fn attach_top(
        &mut self,
        tag: &str,
        xref: Option<&str>,
        value: &str,
        line: u32,
    ) -> NodeId {
        let id = self.alloc(tag, xref, value.to_string(), None, line);
        if self.header.is_none() && tag.eq_ignore_ascii_case("HEAD") {
            self.header = Some(id);
            return id;
        }
        self.records.push(id);
        if let Some(x) = xref {
            self.index.insert(x.to_string(), id);
        }
        id
    }

    pub(crate) fn attach_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        xref: Option<&str>,
        value: &str,
        line: u32,
    ) -> NodeId {
        self.alloc(tag, xref, value.to_string(), Some(parent), line)
    }

    pub(crate) fn fold(&mut self, id: NodeId, continuation: Continuation, value: &str) {
        continuation.fold_into(&mut self.nodes[id.0].value, value);
    }

    /// Unescape complete values and derive payloads for every node.
    pub(crate) fn finish(&mut self) {
        for i in 0..self.nodes.len() {
            let unescaped = match unescape_value(&self.nodes[i].value) {
                Cow::Owned(v) => Some(v),
                Cow::Borrowed(_) => None,
            };
            if let Some(v) = unescaped {
                self.nodes[i].value = v;
                self.nodes[i].escaped = true;
            }
            self.derive_kind(NodeId(i));
        }
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("xref", &self.xref())
            .field("value", &self.value())
            .finish()
    }
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Upper-cased tag name.
    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    pub fn xref(&self) -> Option<&'a str> {
        self.data().xref.as_deref()
    }

    /// Full value with continuations joined and `@@` unescaped.
    pub fn value(&self) -> &'a str {
        &self.data().value
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    pub fn line(&self) -> u32 {
        self.data().line
    }

    /// Nesting depth; top-level nodes are 0.
    pub fn level(&self) -> usize {
        let mut level = 0;
        let mut cur = self.data().parent;
        while let Some(p) = cur {
            level += 1;
            cur = self.doc.nodes[p.0].parent;
        }
        level
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let doc = self.doc;
        self.data().parent.map(|id| NodeRef { doc, id })
    }

    /// Owning top-level node.
    pub fn record(&self) -> NodeRef<'a> {
        let mut cur = *self;
        while let Some(p) = cur.parent() {
            cur = p;
        }
        cur
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |id| NodeRef { doc, id: *id })
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// First child with the tag, case-insensitive.
    pub fn get_tag(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.tag().eq_ignore_ascii_case(tag))
    }

    pub fn get_tags<'t>(&self, tag: &'t str) -> impl Iterator<Item = NodeRef<'a>> + 't
    where
        'a: 't,
    {
        self.children()
            .filter(move |c| c.tag().eq_ignore_ascii_case(tag))
    }

    /// This node and everything below it, in document order.
    pub fn subtree(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(n) = stack.pop() {
            out.push(n);
            let children: Vec<_> = n.children().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Value read from `@@` escapes; written back escaped.
    pub fn is_escaped(&self) -> bool {
        self.data().escaped
    }

    /// Cross-reference named by a pointer value.
    pub fn pointer(&self) -> Option<&'a str> {
        if self.is_escaped() {
            return None;
        }
        pointer_target(self.value())
    }

    pub fn date(&self) -> Option<&'a DateValue> {
        match self.kind() {
            NodeKind::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn record_kind(&self) -> Option<RecordKind> {
        match self.kind() {
            NodeKind::Record(k) => Some(*k),
            _ => None,
        }
    }

    pub fn is_header(&self) -> bool {
        self.doc.header == Some(self.id)
    }
}
