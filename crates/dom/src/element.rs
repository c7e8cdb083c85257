//! DOM Element implementation.

use crate::attributes::AttributeMap;
use bitflags::bitflags;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Element name. Names are lowercased on creation and share one allocation
/// per distinct name, so cloning a tag into every box is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagName(Arc<str>);

impl TagName {
    pub fn new(name: &str) -> Self {
        static NAMES: Lazy<RwLock<HashMap<String, Arc<str>>>> = Lazy::new(Default::default);

        let lower = name.to_ascii_lowercase();
        if let Some(interned) = NAMES.read().get(&lower) {
            return TagName(interned.clone());
        }
        let interned = NAMES
            .write()
            .entry(lower)
            .or_insert_with_key(|key| Arc::from(key.as_str()))
            .clone();
        TagName(interned)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    /// The only element replaced by default.
    pub fn img() -> Self {
        Self::new("img")
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// Never has children in markup.
        const VOID = 1 << 0;
        /// Carries the `hidden` attribute and gets `display: none`.
        const HIDDEN = 1 << 1;
    }
}

/// Element payload of a node. `id`, `class_list`, `flags` and
/// `inline_style` mirror the attributes they come from and are kept in sync
/// by [`ElementData::set_attribute`].
#[derive(Clone, Debug)]
pub struct ElementData {
    pub tag_name: TagName,
    pub attributes: AttributeMap,
    pub id: Option<Arc<str>>,
    pub class_list: SmallVec<[Arc<str>; 4]>,
    pub flags: ElementFlags,
    /// Declarations of the `style` attribute, unparsed.
    pub inline_style: Option<String>,
}

impl ElementData {
    pub fn new(tag_name: TagName) -> Self {
        let flags = Self::default_flags(&tag_name);
        Self {
            tag_name,
            attributes: AttributeMap::new(),
            id: None,
            class_list: SmallVec::new(),
            flags,
            inline_style: None,
        }
    }

    fn default_flags(tag_name: &TagName) -> ElementFlags {
        match tag_name.as_str() {
            "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "param" | "source" | "track" | "wbr" => ElementFlags::VOID,
            _ => ElementFlags::empty(),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "id" => self.id = Some(Arc::from(value)),
            "class" => self.class_list = value.split_whitespace().map(Arc::from).collect(),
            "style" => self.inline_style = Some(value.to_string()),
            "hidden" => self.flags.insert(ElementFlags::HIDDEN),
            _ => {}
        }
        self.attributes.set(&name, value);
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c.as_ref() == class)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.flags.contains(ElementFlags::VOID)
    }

    /// Whether the `hidden` attribute is present.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(ElementFlags::HIDDEN)
    }
}
