//! User-agent `display` defaults for HTML elements.

use crate::computed::Display;

/// Default `display` for an element with the given (lowercase) tag name.
pub fn default_display(tag: &str) -> Display {
    match tag {
        "head" | "script" | "style" | "title" | "meta" | "link" | "base" | "template"
        | "noscript" | "area" | "datalist" | "param" | "source" | "track" => Display::None,

        "html" | "body" | "address" | "article" | "aside" | "blockquote" | "center"
        | "details" | "dialog" | "dd" | "div" | "dl" | "dt" | "fieldset" | "figcaption"
        | "figure" | "footer" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header"
        | "hgroup" | "hr" | "main" | "menu" | "nav" | "ol" | "p" | "pre" | "section"
        | "summary" | "ul" | "legend" => Display::Block,

        "li" => Display::ListItem,

        "table" => Display::Table,
        "caption" => Display::TableCaption,
        "thead" => Display::TableHeaderGroup,
        "tbody" => Display::TableRowGroup,
        "tfoot" => Display::TableFooterGroup,
        "tr" => Display::TableRow,
        "td" | "th" => Display::TableCell,
        "col" => Display::TableColumn,
        "colgroup" => Display::TableColumnGroup,

        _ => Display::Inline,
    }
}
