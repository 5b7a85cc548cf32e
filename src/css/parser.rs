//! Stylesheet parsing on top of `cssparser`.
//!
//! Produces a tree of style rules and conditional groups (`@media`,
//! `@supports`, ...). Only the structure needed for class analysis is kept:
//! selector lists, declarations, and the prelude of every enclosing group.
//! Other at-rules (`@keyframes`, `@font-face`, `@import`, ...) are skipped.
//!
//! `cssparser` follows the CSS Syntax error recovery rules, so a block or
//! comment left open at the end of the file is closed implicitly. The first
//! error it reports rejects the whole file. On top of that, a stray `}`, a
//! selector with no block, and a `{` inside a declaration list are errors.
use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError as CssParseError,
    ParseErrorKind as CssErrorKind, Parser, ParserInput, ParserState, QualifiedRuleParser,
    RuleBodyItemParser, RuleBodyParser, StyleSheetParser, ToCss, Token,
};
use thiserror::Error;

/// A single `property: value` pair inside a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A plain rule: selector list plus declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub line: usize, // 1-based line of the first selector character
}

/// A conditional group at-rule wrapping nested rules, e.g.
/// `@media (max-width: 767px) { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalGroup {
    pub prelude: String, // whitespace-collapsed text between keyword and `{`
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Style(StyleRule),
    Conditional(ConditionalGroup),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated string")]
    UnterminatedString,
    #[error("malformed url()")]
    MalformedUrl,
    #[error("unexpected `}}`")]
    UnexpectedCloseBrace,
    #[error("missing `{{` after selector")]
    MissingBlock,
    #[error("unexpected `{{` inside declaration block")]
    NestedBlock,
    #[error("malformed declaration `{0}`")]
    MalformedDeclaration(String),
    #[error("unexpected `{0}`")]
    UnexpectedToken(String),
    #[error("invalid rule")]
    InvalidRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

type CssError<'i> = CssParseError<'i, ParseErrorKind>;

impl From<CssError<'_>> for ParseError {
    fn from(err: CssError<'_>) -> Self {
        let kind = match err.kind {
            CssErrorKind::Custom(kind) => kind,
            // The only rule that can run out of input is a selector with no block.
            CssErrorKind::Basic(BasicParseErrorKind::EndOfInput) => ParseErrorKind::MissingBlock,
            CssErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                ParseErrorKind::UnexpectedToken(token.to_css_string())
            }
            CssErrorKind::Basic(_) => ParseErrorKind::InvalidRule,
        };
        ParseError {
            line: err.location.line as usize + 1,
            kind,
        }
    }
}

/// At-rules whose block holds ordinary rules that apply conditionally.
const CONDITIONAL_GROUPS: &[&str] = &[
    "media",
    "supports",
    "container",
    "layer",
    "document",
    "-moz-document",
];

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tokens that never belong in a selector or at-rule prelude.
fn prelude_error(token: &Token) -> Option<ParseErrorKind> {
    match token {
        Token::BadString(_) => Some(ParseErrorKind::UnterminatedString),
        Token::BadUrl(_) => Some(ParseErrorKind::MalformedUrl),
        Token::CloseCurlyBracket => Some(ParseErrorKind::UnexpectedCloseBrace),
        Token::Semicolon => Some(ParseErrorKind::MissingBlock),
        _ => None,
    }
}

/// Append the serialized form of `token` to `out`, descending into
/// functions and bracketed blocks. Comments never reach this point.
fn render_token<'i>(
    input: &mut Parser<'i, '_>,
    token: Token<'i>,
    out: &mut String,
) -> Result<(), CssError<'i>> {
    if let Some(kind) = prelude_error(&token) {
        return Err(input.new_custom_error(kind));
    }
    match token {
        Token::WhiteSpace(_) => out.push(' '),
        Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
            out.push_str(&token.to_css_string());
            input.parse_nested_block(|nested| render_all(nested, out))?;
            out.push(if token == Token::SquareBracketBlock { ']' } else { ')' });
        }
        other => out.push_str(&other.to_css_string()),
    }
    Ok(())
}

fn render_all<'i>(input: &mut Parser<'i, '_>, out: &mut String) -> Result<(), CssError<'i>> {
    while let Ok(token) = input.next_including_whitespace().cloned() {
        render_token(input, token, out)?;
    }
    Ok(())
}

/// Read a selector list, splitting on top-level commas (`:is(.a, .b)`
/// stays whole).
fn selector_list<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<String>, CssError<'i>> {
    let mut selectors = Vec::new();
    let mut current = String::new();
    while let Ok(token) = input.next_including_whitespace().cloned() {
        if token == Token::Comma {
            selectors.push(collapse_whitespace(&current));
            current.clear();
        } else {
            render_token(input, token, &mut current)?;
        }
    }
    selectors.push(collapse_whitespace(&current));
    selectors.retain(|s| !s.is_empty());
    Ok(selectors)
}

/// Consume the rest of `input` without looking at it.
fn skip_rest(input: &mut Parser<'_, '_>) {
    while input.next().is_ok() {}
}

/// Parses the body of a style rule. Only declarations are accepted.
struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ParseErrorKind;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Declaration, CssError<'i>> {
        // Value text is copied from the source token by token so it stays
        // byte-identical, minus comments.
        let mut value = String::new();
        loop {
            let before = input.position();
            let token = match input.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            let kind = match token {
                Token::Comment(_) => {
                    value.push(' ');
                    continue;
                }
                Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                    input.parse_nested_block(|nested| {
                        skip_rest(nested);
                        Ok::<_, CssError<'i>>(())
                    })?;
                    value.push_str(input.slice_from(before));
                    continue;
                }
                Token::CurlyBracketBlock => ParseErrorKind::NestedBlock,
                Token::BadString(_) => ParseErrorKind::UnterminatedString,
                Token::BadUrl(_) => ParseErrorKind::MalformedUrl,
                _ => {
                    value.push_str(input.slice_from(before));
                    continue;
                }
            };
            return Err(input.new_custom_error(kind));
        }
        Ok(Declaration {
            property: name.to_string(),
            value: collapse_whitespace(&value),
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ParseErrorKind;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ParseErrorKind;
}

impl<'i> RuleBodyItemParser<'i, Declaration, ParseErrorKind> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

fn parse_declarations<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<Declaration>, CssError<'i>> {
    let mut declarations = Vec::new();
    for item in RuleBodyParser::new(input, &mut DeclarationListParser) {
        match item {
            Ok(declaration) => declarations.push(declaration),
            Err((err, _)) if matches!(err.kind, CssErrorKind::Custom(_)) => return Err(err),
            Err((err, text)) => {
                let kind = if text.contains('{') {
                    ParseErrorKind::NestedBlock
                } else {
                    ParseErrorKind::MalformedDeclaration(collapse_whitespace(
                        text.trim_end_matches(';'),
                    ))
                };
                return Err(CssParseError {
                    kind: CssErrorKind::Custom(kind),
                    location: err.location,
                });
            }
        }
    }
    Ok(declarations)
}

/// Prelude of an at-rule in a rule list.
enum AtRulePrelude {
    Conditional(String),
    Skipped,
}

/// Parses a list of rules: the stylesheet itself or the body of a
/// conditional group. Skipped at-rules come out as `None`.
struct RuleListParser;

impl<'i> QualifiedRuleParser<'i> for RuleListParser {
    type Prelude = Vec<String>;
    type QualifiedRule = Option<Rule>;
    type Error = ParseErrorKind;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Vec<String>, CssError<'i>> {
        selector_list(input)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Vec<String>,
        start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Option<Rule>, CssError<'i>> {
        Ok(Some(Rule::Style(StyleRule {
            selectors,
            declarations: parse_declarations(input)?,
            line: start.source_location().line as usize + 1,
        })))
    }
}

impl<'i> AtRuleParser<'i> for RuleListParser {
    type Prelude = AtRulePrelude;
    type AtRule = Option<Rule>;
    type Error = ParseErrorKind;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<AtRulePrelude, CssError<'i>> {
        if CONDITIONAL_GROUPS.iter().any(|k| name.eq_ignore_ascii_case(k)) {
            let mut text = String::new();
            render_all(input, &mut text)?;
            Ok(AtRulePrelude::Conditional(collapse_whitespace(&text)))
        } else {
            skip_rest(input);
            Ok(AtRulePrelude::Skipped)
        }
    }

    fn rule_without_block(
        &mut self,
        _prelude: AtRulePrelude,
        _start: &ParserState,
    ) -> Result<Option<Rule>, ()> {
        Ok(None)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: AtRulePrelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Option<Rule>, CssError<'i>> {
        match prelude {
            AtRulePrelude::Conditional(prelude) => Ok(Some(Rule::Conditional(ConditionalGroup {
                prelude,
                rules: parse_rule_list(input)?,
            }))),
            AtRulePrelude::Skipped => {
                skip_rest(input);
                Ok(None)
            }
        }
    }
}

fn parse_rule_list<'i>(input: &mut Parser<'i, '_>) -> Result<Vec<Rule>, CssError<'i>> {
    let mut rules = Vec::new();
    for item in StyleSheetParser::new(input, &mut RuleListParser) {
        match item {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err((err, _)) => return Err(err),
        }
    }
    Ok(rules)
}

/// Parse a whole stylesheet. The first error rejects the file.
pub fn parse_stylesheet(src: &str) -> Result<Vec<Rule>, ParseError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let mut input = ParserInput::new(src);
    let mut parser = Parser::new(&mut input);
    parse_rule_list(&mut parser).map_err(ParseError::from)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
