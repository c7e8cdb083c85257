//! Box variants of the visual formatting tree.

use style::computed::{ComputedStyle, Display};

/// Box kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxKind {
    /// Root of the tree, standing for the initial containing block.
    Viewport,
    /// Run of character data.
    Text,
    /// Inline-level element box.
    Inline,
    /// Inline-level replaced element (img, ...).
    InlineReplaced,
    /// Block-level element box.
    Block,
    /// Block-level replaced element.
    BlockReplaced,
    /// List item.
    ListItem,
    /// Table box.
    Table,
    /// Table caption.
    TableCaption,
    /// Table row group (also header and footer groups).
    TableRowGroup,
    /// Table row.
    TableRow,
    /// Table cell.
    TableCell,
    /// Table column.
    TableColumn,
    /// Table column group.
    TableColumnGroup,
}

impl BoxKind {
    /// Kind of a non-replaced element box with the given style.
    pub fn from_style(style: &ComputedStyle) -> Self {
        match style.display {
            Display::ListItem => BoxKind::ListItem,
            Display::Table => BoxKind::Table,
            Display::TableCaption => BoxKind::TableCaption,
            Display::TableRowGroup | Display::TableHeaderGroup | Display::TableFooterGroup => {
                BoxKind::TableRowGroup
            }
            Display::TableRow => BoxKind::TableRow,
            Display::TableCell => BoxKind::TableCell,
            Display::TableColumn => BoxKind::TableColumn,
            Display::TableColumnGroup => BoxKind::TableColumnGroup,
            _ if style.is_block_level() => BoxKind::Block,
            _ => BoxKind::Inline,
        }
    }

    /// Kind of a replaced element box with the given style.
    pub fn replaced(style: &ComputedStyle) -> Self {
        if style.is_block_level() {
            BoxKind::BlockReplaced
        } else {
            BoxKind::InlineReplaced
        }
    }

    /// Every kind except text and the two inline kinds is a block box.
    pub fn is_block(&self) -> bool {
        !matches!(self, BoxKind::Text | BoxKind::Inline | BoxKind::InlineReplaced)
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, BoxKind::InlineReplaced | BoxKind::BlockReplaced)
    }

    /// The block variant an inline box turns into when it has to hold
    /// block-level content.
    pub fn promoted(self) -> Self {
        match self {
            BoxKind::Inline => BoxKind::Block,
            BoxKind::InlineReplaced => BoxKind::BlockReplaced,
            other => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoxKind::Viewport => "Viewport",
            BoxKind::Text => "Text",
            BoxKind::Inline => "Inline",
            BoxKind::InlineReplaced => "InlineReplaced",
            BoxKind::Block => "Block",
            BoxKind::BlockReplaced => "BlockReplaced",
            BoxKind::ListItem => "ListItem",
            BoxKind::Table => "Table",
            BoxKind::TableCaption => "TableCaption",
            BoxKind::TableRowGroup => "TableRowGroup",
            BoxKind::TableRow => "TableRow",
            BoxKind::TableCell => "TableCell",
            BoxKind::TableColumn => "TableColumn",
            BoxKind::TableColumnGroup => "TableColumnGroup",
        }
    }
}

/// Why a box without a source element exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnonymousKind {
    /// Wraps a text run among element siblings.
    Inline,
    /// Groups a run of inline-level children of a block container.
    Block,
    /// Missing row around table cells.
    TableRow,
    /// Missing row group around table rows.
    TableRowGroup,
    /// Missing table around row groups.
    Table,
}

impl AnonymousKind {
    pub fn display(&self) -> Display {
        match self {
            AnonymousKind::Inline => Display::Inline,
            AnonymousKind::Block => Display::Block,
            AnonymousKind::TableRow => Display::TableRow,
            AnonymousKind::TableRowGroup => Display::TableRowGroup,
            AnonymousKind::Table => Display::Table,
        }
    }

    pub fn box_kind(&self) -> BoxKind {
        match self {
            AnonymousKind::Inline => BoxKind::Inline,
            AnonymousKind::Block => BoxKind::Block,
            AnonymousKind::TableRow => BoxKind::TableRow,
            AnonymousKind::TableRowGroup => BoxKind::TableRowGroup,
            AnonymousKind::Table => BoxKind::Table,
        }
    }

    /// Element name the box is reported under.
    pub fn tag(&self) -> &'static str {
        match self {
            AnonymousKind::Inline => "Xspan",
            AnonymousKind::Block => "div",
            AnonymousKind::TableRow => "tr",
            AnonymousKind::TableRowGroup => "tbody",
            AnonymousKind::Table => "table",
        }
    }
}
