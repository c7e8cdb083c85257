//! Computed style values.

use crate::declarations::{parse_declarations, parse_family_list};
use common::error::{BoxTreeError, BoxTreeResult};
use std::sync::Arc;

/// Class marker carried by styles of boxes that have no source element.
pub const ANONYMOUS_CLASS: &str = "Xanonymous";

/// Computed style for an element.
///
/// Only the properties that decide box construction are kept, plus the
/// inheritable text properties that anonymous wrappers copy from their
/// parent.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Display type.
    pub display: Display,
    /// Position type.
    pub position: Position,
    /// Float.
    pub float: Float,
    /// Overflow.
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    /// Visibility.
    pub visibility: Visibility,

    /// Typography.
    pub font_family: Vec<String>,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub line_height: LineHeight,
    pub text_align: TextAlign,
    pub white_space: WhiteSpace,
    pub letter_spacing: f32,
    pub word_spacing: f32,

    /// List style.
    pub list_style_type: ListStyleType,
    pub list_style_position: ListStylePosition,

    /// Set on synthetic styles built for anonymous boxes.
    pub class_marker: Option<Arc<str>>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::default_style()
    }
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get default style.
    pub fn default_style() -> Self {
        Self {
            display: Display::Inline,
            position: Position::Static,
            float: Float::None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            visibility: Visibility::Visible,
            font_family: vec!["sans-serif".to_string()],
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            line_height: LineHeight::Normal,
            text_align: TextAlign::Start,
            white_space: WhiteSpace::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            list_style_type: ListStyleType::Disc,
            list_style_position: ListStylePosition::Outside,
            class_marker: None,
        }
    }

    /// Minimal style for a box without a resolved style: initial values, the
    /// given `display` and the anonymous class marker.
    pub fn anonymous(display: Display) -> Self {
        Self {
            display,
            class_marker: Some(Arc::from(ANONYMOUS_CLASS)),
            ..Self::default_style()
        }
    }

    /// Copy of this style whose inheritable properties come from `parent`.
    pub fn inherit_from(&self, parent: &ComputedStyle) -> Self {
        Self {
            visibility: parent.visibility,
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style,
            line_height: parent.line_height,
            text_align: parent.text_align,
            white_space: parent.white_space,
            letter_spacing: parent.letter_spacing,
            word_spacing: parent.word_spacing,
            list_style_type: parent.list_style_type,
            list_style_position: parent.list_style_position,
            ..self.clone()
        }
    }

    /// Whether this style was synthesized for an anonymous box.
    pub fn is_anonymous(&self) -> bool {
        self.class_marker.as_deref() == Some(ANONYMOUS_CLASS)
    }

    /// Check if element is block-level.
    pub fn is_block_level(&self) -> bool {
        matches!(
            self.display,
            Display::Block
                | Display::Flex
                | Display::Grid
                | Display::Table
                | Display::ListItem
                | Display::FlowRoot
                | Display::TableCaption
                | Display::TableRowGroup
                | Display::TableHeaderGroup
                | Display::TableFooterGroup
                | Display::TableRow
                | Display::TableCell
                | Display::TableColumn
                | Display::TableColumnGroup
        )
    }

    pub fn is_positioned(&self) -> bool {
        self.position != Position::Static
    }

    pub fn is_absolutely_positioned(&self) -> bool {
        matches!(self.position, Position::Absolute | Position::Fixed)
    }

    pub fn is_floating(&self) -> bool {
        self.float != Float::None
    }

    /// Floated and absolutely positioned boxes leave the normal flow.
    pub fn is_out_of_flow(&self) -> bool {
        self.is_floating() || self.is_absolutely_positioned()
    }

    /// Whether descendants are clipped to this box.
    pub fn clips_overflow(&self) -> bool {
        self.overflow_x == Overflow::Hidden || self.overflow_y == Overflow::Hidden
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Set a property from its CSS text. `inherit` takes the parent's value
    /// (or the initial value without a parent), `initial` and `unset` reset
    /// to the initial value.
    pub fn set_property(
        &mut self,
        name: &str,
        value: &str,
        parent: Option<&ComputedStyle>,
    ) -> BoxTreeResult<()> {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        let keyword = value.to_ascii_lowercase();

        match keyword.as_str() {
            "inherit" => {
                let initial = Self::default_style();
                return self.copy_property(&name, parent.unwrap_or(&initial));
            }
            "initial" | "unset" | "revert" => {
                return self.copy_property(&name, &Self::default_style());
            }
            _ => {}
        }

        let invalid = || BoxTreeError::invalid_value(name.as_str(), value);

        match name.as_str() {
            "display" => self.display = Display::from_keyword(&keyword).ok_or_else(invalid)?,
            "position" => self.position = Position::from_keyword(&keyword).ok_or_else(invalid)?,
            "float" => self.float = Float::from_keyword(&keyword).ok_or_else(invalid)?,
            "overflow" => {
                let overflow = Overflow::from_keyword(&keyword).ok_or_else(invalid)?;
                self.overflow_x = overflow;
                self.overflow_y = overflow;
            }
            "overflow-x" => self.overflow_x = Overflow::from_keyword(&keyword).ok_or_else(invalid)?,
            "overflow-y" => self.overflow_y = Overflow::from_keyword(&keyword).ok_or_else(invalid)?,
            "visibility" => {
                self.visibility = Visibility::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "font-family" => self.font_family = parse_family_list(value).ok_or_else(invalid)?,
            "font-size" => self.font_size = parse_px(&keyword).ok_or_else(invalid)?,
            "font-weight" => {
                self.font_weight = FontWeight::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "font-style" => {
                self.font_style = FontStyle::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "line-height" => {
                self.line_height = LineHeight::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "text-align" => {
                self.text_align = TextAlign::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "white-space" => {
                self.white_space = WhiteSpace::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "letter-spacing" => self.letter_spacing = parse_spacing(&keyword).ok_or_else(invalid)?,
            "word-spacing" => self.word_spacing = parse_spacing(&keyword).ok_or_else(invalid)?,
            "list-style-type" => {
                self.list_style_type = ListStyleType::from_keyword(&keyword).ok_or_else(invalid)?
            }
            "list-style-position" => {
                self.list_style_position =
                    ListStylePosition::from_keyword(&keyword).ok_or_else(invalid)?
            }
            _ => return Err(BoxTreeError::unknown_property(name.as_str())),
        }

        Ok(())
    }

    fn copy_property(&mut self, name: &str, from: &ComputedStyle) -> BoxTreeResult<()> {
        match name {
            "display" => self.display = from.display,
            "position" => self.position = from.position,
            "float" => self.float = from.float,
            "overflow" => {
                self.overflow_x = from.overflow_x;
                self.overflow_y = from.overflow_y;
            }
            "overflow-x" => self.overflow_x = from.overflow_x,
            "overflow-y" => self.overflow_y = from.overflow_y,
            "visibility" => self.visibility = from.visibility,
            "font-family" => self.font_family = from.font_family.clone(),
            "font-size" => self.font_size = from.font_size,
            "font-weight" => self.font_weight = from.font_weight,
            "font-style" => self.font_style = from.font_style,
            "line-height" => self.line_height = from.line_height,
            "text-align" => self.text_align = from.text_align,
            "white-space" => self.white_space = from.white_space,
            "letter-spacing" => self.letter_spacing = from.letter_spacing,
            "word-spacing" => self.word_spacing = from.word_spacing,
            "list-style-type" => self.list_style_type = from.list_style_type,
            "list-style-position" => self.list_style_position = from.list_style_position,
            _ => return Err(BoxTreeError::unknown_property(name)),
        }
        Ok(())
    }

    /// Apply a `name: value; ...` declaration block. Declarations that fail
    /// are skipped and their errors returned. `!important` is accepted and
    /// has no further effect.
    pub fn apply_declarations(
        &mut self,
        block: &str,
        parent: Option<&ComputedStyle>,
    ) -> Vec<BoxTreeError> {
        parse_declarations(block)
            .into_iter()
            .filter_map(|declaration| {
                declaration
                    .and_then(|d| self.set_property(&d.name, &d.value, parent))
                    .err()
            })
            .collect()
    }

    /// Read a property as CSS text.
    pub fn property_value(&self, name: &str) -> Option<String> {
        let value = match name.trim().to_ascii_lowercase().as_str() {
            "display" => self.display.keyword().to_string(),
            "position" => self.position.keyword().to_string(),
            "float" => self.float.keyword().to_string(),
            "overflow" if self.overflow_x == self.overflow_y => self.overflow_x.keyword().to_string(),
            "overflow" => format!("{} {}", self.overflow_x.keyword(), self.overflow_y.keyword()),
            "overflow-x" => self.overflow_x.keyword().to_string(),
            "overflow-y" => self.overflow_y.keyword().to_string(),
            "visibility" => self.visibility.keyword().to_string(),
            "font-family" => self.font_family.join(", "),
            "font-size" => format!("{}px", self.font_size),
            "font-weight" => self.font_weight.keyword().to_string(),
            "font-style" => self.font_style.keyword().to_string(),
            "line-height" => match self.line_height {
                LineHeight::Normal => "normal".to_string(),
                LineHeight::Number(n) => n.to_string(),
                LineHeight::Length(px) => format!("{}px", px),
            },
            "text-align" => self.text_align.keyword().to_string(),
            "white-space" => self.white_space.keyword().to_string(),
            "letter-spacing" => format!("{}px", self.letter_spacing),
            "word-spacing" => format!("{}px", self.word_spacing),
            "list-style-type" => self.list_style_type.keyword().to_string(),
            "list-style-position" => self.list_style_position.keyword().to_string(),
            "class" => self.class_marker.as_deref()?.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn parse_px(value: &str) -> Option<f32> {
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_spacing(value: &str) -> Option<f32> {
    if value == "normal" {
        return Some(0.0);
    }
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Display value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    None,
    Block,
    #[default]
    Inline,
    InlineBlock,
    Flex,
    InlineFlex,
    Grid,
    InlineGrid,
    Table,
    InlineTable,
    TableRow,
    TableCell,
    TableColumn,
    TableCaption,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableColumnGroup,
    ListItem,
    FlowRoot,
    Contents,
}

impl Display {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "none" => Display::None,
            "block" => Display::Block,
            "inline" => Display::Inline,
            "inline-block" => Display::InlineBlock,
            "flex" => Display::Flex,
            "inline-flex" => Display::InlineFlex,
            "grid" => Display::Grid,
            "inline-grid" => Display::InlineGrid,
            "table" => Display::Table,
            "inline-table" => Display::InlineTable,
            "table-row" => Display::TableRow,
            "table-cell" => Display::TableCell,
            "table-column" => Display::TableColumn,
            "table-caption" => Display::TableCaption,
            "table-row-group" => Display::TableRowGroup,
            "table-header-group" => Display::TableHeaderGroup,
            "table-footer-group" => Display::TableFooterGroup,
            "table-column-group" => Display::TableColumnGroup,
            "list-item" => Display::ListItem,
            "flow-root" => Display::FlowRoot,
            "contents" => Display::Contents,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::Flex => "flex",
            Display::InlineFlex => "inline-flex",
            Display::Grid => "grid",
            Display::InlineGrid => "inline-grid",
            Display::Table => "table",
            Display::InlineTable => "inline-table",
            Display::TableRow => "table-row",
            Display::TableCell => "table-cell",
            Display::TableColumn => "table-column",
            Display::TableCaption => "table-caption",
            Display::TableRowGroup => "table-row-group",
            Display::TableHeaderGroup => "table-header-group",
            Display::TableFooterGroup => "table-footer-group",
            Display::TableColumnGroup => "table-column-group",
            Display::ListItem => "list-item",
            Display::FlowRoot => "flow-root",
            Display::Contents => "contents",
        }
    }
}

/// Position value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "static" => Position::Static,
            "relative" => Position::Relative,
            "absolute" => Position::Absolute,
            "fixed" => Position::Fixed,
            "sticky" => Position::Sticky,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
            Position::Sticky => "sticky",
        }
    }
}

/// Float value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

impl Float {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "none" => Float::None,
            "left" | "inline-start" => Float::Left,
            "right" | "inline-end" => Float::Right,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Float::None => "none",
            Float::Left => "left",
            Float::Right => "right",
        }
    }
}

/// Overflow value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
    Clip,
}

impl Overflow {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "visible" => Overflow::Visible,
            "hidden" => Overflow::Hidden,
            "scroll" => Overflow::Scroll,
            "auto" => Overflow::Auto,
            "clip" => Overflow::Clip,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Overflow::Visible => "visible",
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
            Overflow::Auto => "auto",
            Overflow::Clip => "clip",
        }
    }
}

/// Visibility value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

impl Visibility {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "visible" => Visibility::Visible,
            "hidden" => Visibility::Hidden,
            "collapse" => Visibility::Collapse,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
            Visibility::Collapse => "collapse",
        }
    }
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
    Weight(u16),
}

impl FontWeight {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "normal" => FontWeight::Normal,
            "bold" => FontWeight::Bold,
            "bolder" => FontWeight::Bolder,
            "lighter" => FontWeight::Lighter,
            other => {
                let weight = other.parse::<u16>().ok()?;
                if !(1..=1000).contains(&weight) {
                    return None;
                }
                FontWeight::Weight(weight)
            }
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Bolder => "bolder",
            FontWeight::Lighter => "lighter",
            FontWeight::Weight(w) if *w >= 600 => "bold",
            FontWeight::Weight(_) => "normal",
        }
    }
}

/// Font style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "normal" => FontStyle::Normal,
            "italic" => FontStyle::Italic,
            "oblique" => FontStyle::Oblique,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

/// Line height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    #[default]
    Normal,
    Number(f32),
    Length(f32),
}

impl LineHeight {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword == "normal" {
            return Some(LineHeight::Normal);
        }
        if let Some(px) = keyword.strip_suffix("px") {
            return px.trim().parse().ok().map(LineHeight::Length);
        }
        keyword.parse().ok().map(LineHeight::Number)
    }
}

/// Text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "start" => TextAlign::Start,
            "end" => TextAlign::End,
            "left" => TextAlign::Left,
            "right" => TextAlign::Right,
            "center" => TextAlign::Center,
            "justify" => TextAlign::Justify,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::End => "end",
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

/// White space handling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Pre,
    NoWrap,
    PreWrap,
    PreLine,
}

impl WhiteSpace {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "normal" => WhiteSpace::Normal,
            "pre" => WhiteSpace::Pre,
            "nowrap" => WhiteSpace::NoWrap,
            "pre-wrap" => WhiteSpace::PreWrap,
            "pre-line" => WhiteSpace::PreLine,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            WhiteSpace::Normal => "normal",
            WhiteSpace::Pre => "pre",
            WhiteSpace::NoWrap => "nowrap",
            WhiteSpace::PreWrap => "pre-wrap",
            WhiteSpace::PreLine => "pre-line",
        }
    }
}

/// List style type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListStyleType {
    None,
    #[default]
    Disc,
    Circle,
    Square,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl ListStyleType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "none" => ListStyleType::None,
            "disc" => ListStyleType::Disc,
            "circle" => ListStyleType::Circle,
            "square" => ListStyleType::Square,
            "decimal" => ListStyleType::Decimal,
            "lower-alpha" | "lower-latin" => ListStyleType::LowerAlpha,
            "upper-alpha" | "upper-latin" => ListStyleType::UpperAlpha,
            "lower-roman" => ListStyleType::LowerRoman,
            "upper-roman" => ListStyleType::UpperRoman,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ListStyleType::None => "none",
            ListStyleType::Disc => "disc",
            ListStyleType::Circle => "circle",
            ListStyleType::Square => "square",
            ListStyleType::Decimal => "decimal",
            ListStyleType::LowerAlpha => "lower-alpha",
            ListStyleType::UpperAlpha => "upper-alpha",
            ListStyleType::LowerRoman => "lower-roman",
            ListStyleType::UpperRoman => "upper-roman",
        }
    }
}

/// List style position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListStylePosition {
    Inside,
    #[default]
    Outside,
}

impl ListStylePosition {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "inside" => ListStylePosition::Inside,
            "outside" => ListStylePosition::Outside,
            _ => return None,
        })
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ListStylePosition::Inside => "inside",
            ListStylePosition::Outside => "outside",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = ComputedStyle::default_style();
        assert_eq!(style.display, Display::Inline);
        assert_eq!(style.position, Position::Static);
        assert!(!style.clips_overflow());
        assert!(style.is_visible());
        assert!(!style.is_anonymous());
    }

    #[test]
    fn test_anonymous_style() {
        let style = ComputedStyle::anonymous(Display::TableRow);
        assert_eq!(style.display, Display::TableRow);
        assert!(style.is_anonymous());
        assert_eq!(style.property_value("class").as_deref(), Some(ANONYMOUS_CLASS));
        assert_eq!(style.property_value("display").as_deref(), Some("table-row"));
    }

    #[test]
    fn test_inherit_from_copies_inherited_only() {
        let mut parent = ComputedStyle::default_style();
        parent.display = Display::Block;
        parent.position = Position::Relative;
        parent.font_size = 24.0;
        parent.text_align = TextAlign::Center;
        parent.visibility = Visibility::Hidden;

        let child = ComputedStyle::anonymous(Display::Block).inherit_from(&parent);
        assert_eq!(child.font_size, 24.0);
        assert_eq!(child.text_align, TextAlign::Center);
        assert_eq!(child.visibility, Visibility::Hidden);
        assert_eq!(child.position, Position::Static);
        assert!(child.is_anonymous());
    }

    #[test]
    fn test_set_property() {
        let mut style = ComputedStyle::default_style();
        style.set_property("Display", " table-header-group ", None).unwrap();
        style.set_property("overflow", "hidden", None).unwrap();
        style.set_property("font-family", "\"Open Sans\", serif", None).unwrap();

        assert_eq!(style.display, Display::TableHeaderGroup);
        assert!(style.clips_overflow());
        assert_eq!(style.property_value("overflow").as_deref(), Some("hidden"));
        assert_eq!(style.font_family, vec!["Open Sans".to_string(), "serif".to_string()]);
    }

    #[test]
    fn test_set_property_errors() {
        let mut style = ComputedStyle::default_style();
        assert_eq!(
            style.set_property("display", "sideways", None),
            Err(BoxTreeError::invalid_value("display", "sideways"))
        );
        assert_eq!(
            style.set_property("colour", "red", None),
            Err(BoxTreeError::unknown_property("colour"))
        );
        assert_eq!(style.display, Display::Inline);
    }

    #[test]
    fn test_css_wide_keywords() {
        let mut parent = ComputedStyle::default_style();
        parent.position = Position::Absolute;

        let mut style = ComputedStyle::default_style();
        style.set_property("position", "inherit", Some(&parent)).unwrap();
        assert_eq!(style.position, Position::Absolute);

        style.set_property("position", "initial", Some(&parent)).unwrap();
        assert_eq!(style.position, Position::Static);
    }

    #[test]
    fn test_apply_declarations_skips_invalid() {
        let mut style = ComputedStyle::default_style();
        let rejected = style.apply_declarations(
            "display: block; position: nowhere; float: left !important; ; bogus",
            None,
        );

        assert_eq!(style.display, Display::Block);
        assert_eq!(style.float, Float::Left);
        assert_eq!(style.position, Position::Static);
        assert_eq!(rejected.len(), 2);
        assert!(style.is_out_of_flow());
    }

    #[test]
    fn test_apply_declarations_tokenizes_values() {
        let mut style = ComputedStyle::default_style();
        let rejected = style.apply_declarations(
            "font-family: 'a;b', serif; display: block /* note */; position: RELATIVE !IMPORTANT",
            None,
        );

        assert!(rejected.is_empty(), "{:?}", rejected);
        assert_eq!(style.font_family, vec!["a;b".to_string(), "serif".to_string()]);
        assert_eq!(style.display, Display::Block);
        assert_eq!(style.position, Position::Relative);
        assert!(style.is_positioned());
    }

    #[test]
    fn test_flow_predicates() {
        let mut style = ComputedStyle::default_style();
        style.position = Position::Fixed;
        assert!(style.is_positioned());
        assert!(style.is_absolutely_positioned());
        assert!(style.is_out_of_flow());

        style.position = Position::Relative;
        assert!(style.is_positioned());
        assert!(!style.is_out_of_flow());
    }
}
