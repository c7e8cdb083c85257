//! Serializable outlines of a box tree.

use crate::layout_box::LayoutBoxId;
use crate::tree::LayoutTree;
use serde::Serialize;
use std::fmt;

/// Structural view of one box and its subtree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxSnapshot {
    pub order: usize,
    pub kind: &'static str,
    pub anonymous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub displayed: bool,
    pub empty: bool,
    pub in_flow: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxSnapshot>,
}

impl BoxSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl LayoutTree {
    /// Outline of the subtree at `id`, or of the whole tree when `id` is
    /// `None`.
    pub fn snapshot(&self, id: Option<LayoutBoxId>) -> Option<BoxSnapshot> {
        let id = id.or(self.viewport())?;
        let b = self.get(id)?;
        Some(BoxSnapshot {
            order: b.order,
            kind: b.kind.name(),
            anonymous: b.is_anonymous(),
            tag: b.tag.as_ref().map(|t| t.as_str().to_string()),
            text: b.text.as_deref().map(str::to_string),
            displayed: b.is_displayed(),
            empty: b.is_empty(),
            in_flow: b.is_in_flow(),
            children: b
                .children
                .iter()
                .filter_map(|&child| self.snapshot(Some(child)))
                .collect(),
        })
    }

    /// Indented text rendering of the tree, one box per line.
    pub fn dump(&self) -> String {
        TreeDump(self).to_string()
    }
}

/// [`fmt::Display`] adapter behind [`LayoutTree::dump`].
pub struct TreeDump<'a>(pub &'a LayoutTree);

impl TreeDump<'_> {
    fn write_box(&self, f: &mut fmt::Formatter<'_>, id: LayoutBoxId, depth: usize) -> fmt::Result {
        let Some(b) = self.0.get(id) else {
            return Ok(());
        };
        write!(f, "{:indent$}{}", "", b.kind.name(), indent = depth * 2)?;
        if let Some(tag) = &b.tag {
            write!(f, " <{}>", tag.as_str())?;
        }
        if b.is_anonymous() {
            f.write_str(" anonymous")?;
        }
        if let Some(text) = &b.text {
            write!(f, " {:?}", text)?;
        }
        if !b.is_in_flow() {
            f.write_str(" out-of-flow")?;
        }
        if !b.is_displayed() {
            f.write_str(" hidden")?;
        }
        writeln!(f)?;
        for &child in &b.children {
            self.write_box(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.viewport() {
            Some(viewport) => self.write_box(f, viewport, 0),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeDump;
    use crate::test_support::build_markup;
    use serde_json::json;

    #[test]
    fn test_dump() {
        let built = build_markup("<div><span>a</span><p>b</p></div>");
        let expected = "\
Viewport
  Block <div>
    Block <div> anonymous
      Inline <span>
        Text \"a\"
    Block <p>
      Text \"b\"
";
        assert_eq!(built.tree.dump(), expected);
    }

    #[test]
    fn test_dump_marks_out_of_flow_and_hidden() {
        let built = build_markup(
            r#"<div><b style="float: left">f</b><p style="display: none">x</p></div>"#,
        );
        let dump = format!("{}", TreeDump(&built.tree));

        assert!(dump.contains("Block <b> out-of-flow\n"), "{}", dump);
        assert!(dump.contains("<p> hidden\n"), "{}", dump);
        assert_eq!(dump, built.tree.dump());
        assert_eq!(crate::tree::LayoutTree::new().dump(), "");
    }

    #[test]
    fn test_snapshot_json() {
        let built = build_markup(r#"<div><b style="position: absolute">x</b></div>"#);
        let snapshot = built.tree.snapshot(None).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["kind"], json!("Viewport"));
        assert_eq!(value["order"], json!(0));
        let children = value["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["tag"], json!("b"));
        assert_eq!(children[0]["in_flow"], json!(false));
        assert_eq!(children[1]["tag"], json!("div"));
        assert_eq!(children[1]["empty"], json!(true));
        assert!(children[1].get("children").is_none());
        assert!(snapshot.to_json().unwrap().contains("\"kind\": \"Block\""));
    }
}
