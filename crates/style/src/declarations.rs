//! Declaration block parsing for inline `style` attributes.

use common::error::BoxTreeError;
use cssparser::{
    CowRcStr, DeclarationParser, ParseError, ParseErrorKind, Parser, ParserInput, RuleBodyItemParser,
    RuleBodyParser, ToCss, Token,
};

/// A `name: value` pair from a declaration block. The value is normalized
/// CSS text: tokens separated by single spaces, comments dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

/// Parse a declaration block such as the value of a `style` attribute.
/// Malformed declarations are reported in place and do not stop the parse.
pub fn parse_declarations(css: &str) -> Vec<Result<Declaration, BoxTreeError>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut decl_parser = StyleAttributeParser;

    let declarations = RuleBodyParser::new(&mut parser, &mut decl_parser)
        .map(|result| result.map_err(|(err, slice)| declaration_error(err, slice)))
        .collect();
    declarations
}

/// Parse a `font-family` list into family names. Quoted names are taken
/// verbatim; runs of identifiers are joined with single spaces.
pub fn parse_family_list(value: &str) -> Option<Vec<String>> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let families = parser
        .parse_entirely(|input| input.parse_comma_separated(family_name))
        .ok();
    families
}

fn family_name<'i, 't>(input: &mut Parser<'i, 't>) -> Result<String, ParseError<'i, ()>> {
    if let Ok(name) = input.try_parse(|i| i.expect_string_cloned()) {
        return Ok(String::from(&*name));
    }
    let mut words = vec![String::from(&**input.expect_ident()?)];
    while let Ok(word) = input.try_parse(|i| i.expect_ident_cloned()) {
        words.push(String::from(&*word));
    }
    Ok(words.join(" "))
}

fn declaration_error(err: ParseError<'_, BoxTreeError>, slice: &str) -> BoxTreeError {
    match err.kind {
        ParseErrorKind::Custom(err) => err,
        ParseErrorKind::Basic(_) => {
            BoxTreeError::invalid_value(slice.trim().trim_end_matches(';').trim_end(), "")
        }
    }
}

struct StyleAttributeParser;

impl<'i> DeclarationParser<'i> for StyleAttributeParser {
    type Declaration = Declaration;
    type Error = BoxTreeError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let mut value = String::new();
        let mut important = false;

        while !input.is_exhausted() {
            if input.try_parse(cssparser::parse_important).is_ok() {
                input.expect_exhausted()?;
                important = true;
                break;
            }
            match input.next()? {
                Token::Comma => value.push(','),
                token => {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(&token.to_css_string());
                }
            }
        }

        if value.is_empty() {
            return Err(input.new_custom_error(BoxTreeError::invalid_value(&*name, "")));
        }
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'i> cssparser::AtRuleParser<'i> for StyleAttributeParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = BoxTreeError;
}

impl<'i> cssparser::QualifiedRuleParser<'i> for StyleAttributeParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = BoxTreeError;
}

impl<'i> RuleBodyItemParser<'i, Declaration, BoxTreeError> for StyleAttributeParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
