//! Recursive-descent parser over [`Lexer`], producing [`Document`]/[`Value`]/
//! [`Type`] AST trees.
//!
//! The parser carries no state beyond the lexer handle and a `last_token`
//! marker used to compute node [`Location`]s: every grammar rule captures the
//! token id current at entry, consumes tokens through [`Parser::bump`], and
//! closes out its `Location` from that start id to whatever `last_token` is
//! when the rule returns. No recovery is attempted anywhere — a syntax error
//! aborts the parse immediately, per spec.

use std::rc::Rc;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::Lexer;
use crate::source::Source;
use crate::token::{Token, TokenId, TokenKind};

/// Options recognized by [`parse`]/[`parse_value`]/[`parse_type`].
#[derive(Clone, Default)]
pub struct ParserOptions {
    /// When true, no [`Location`] is attached to any produced AST node.
    pub no_location: bool,
    /// Purely observational hook invoked once per top-level `parse*` call
    /// with the wall-clock start/end of the parse, the source, and the
    /// result. Never affects parsing.
    pub instrumentation: Option<Rc<dyn Instrumentation>>,
}

impl std::fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserOptions")
            .field("no_location", &self.no_location)
            .field("instrumentation", &self.instrumentation.is_some())
            .finish()
    }
}

/// Observational hook for parse timing. See [`ParserOptions::instrumentation`].
pub trait Instrumentation {
    fn on_parse(
        &self,
        start: std::time::Instant,
        end: std::time::Instant,
        source: &Rc<Source>,
        result: &Result<Document, SyntaxError>,
    );
}

/// Anything that can be turned into the `Rc<Source>` a [`Parser`] consumes.
pub trait IntoSource {
    fn into_source(self) -> Rc<Source>;
}

impl IntoSource for &str {
    fn into_source(self) -> Rc<Source> {
        Rc::new(Source::new(self, "GraphQL request"))
    }
}

impl IntoSource for String {
    fn into_source(self) -> Rc<Source> {
        Rc::new(Source::new(self, "GraphQL request"))
    }
}

impl IntoSource for Source {
    fn into_source(self) -> Rc<Source> {
        Rc::new(self)
    }
}

impl IntoSource for Rc<Source> {
    fn into_source(self) -> Rc<Source> {
        self
    }
}

/// `parse(source, options) -> Document`. Wraps the `Document` production with
/// a leading `expect(SOF)` and trailing `expect(EOF)`, per spec.
pub fn parse(source: impl IntoSource, options: ParserOptions) -> Result<Document, SyntaxError> {
    let source = source.into_source();
    let start = std::time::Instant::now();
    let result = (|| {
        let mut parser = Parser::new(source.clone(), options.no_location)?;
        parser.parse_document()
    })();
    if let Some(instrumentation) = &options.instrumentation {
        instrumentation.on_parse(start, std::time::Instant::now(), &source, &result);
    }
    result
}

/// `parseValue(source) -> Value`.
pub fn parse_value(source: impl IntoSource, options: ParserOptions) -> Result<Value, SyntaxError> {
    let source = source.into_source();
    let mut parser = Parser::new(source, options.no_location)?;
    parser.expect_token(TokenKind::Sof)?;
    let value = parser.parse_value_literal(false)?;
    parser.expect_token(TokenKind::Eof)?;
    Ok(value)
}

/// `parseType(source) -> Type`.
pub fn parse_type(source: impl IntoSource, options: ParserOptions) -> Result<Type, SyntaxError> {
    let source = source.into_source();
    let mut parser = Parser::new(source, options.no_location)?;
    parser.expect_token(TokenKind::Sof)?;
    let ty = parser.parse_type_reference()?;
    parser.expect_token(TokenKind::Eof)?;
    Ok(ty)
}

struct Parser {
    lexer: Lexer,
    no_location: bool,
    last_token: TokenId,
}

impl Parser {
    fn new(source: Rc<Source>, no_location: bool) -> Result<Self, SyntaxError> {
        let lexer = Lexer::new(source)?;
        let sof = lexer.token_id();
        Ok(Parser {
            lexer,
            no_location,
            last_token: sof,
        })
    }

    fn current(&self) -> &Token {
        self.lexer.token()
    }

    fn current_id(&self) -> TokenId {
        self.lexer.token_id()
    }

    fn peek(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn peek_keyword(&self, value: &str) -> bool {
        self.peek(TokenKind::Name) && self.current().value.as_deref() == Some(value)
    }

    /// Advances the lexer, returning the id of the token just consumed (the
    /// one that was current before this call), and records it as the most
    /// recently consumed token for location purposes.
    fn bump(&mut self) -> TokenId {
        let consumed = self.current_id();
        self.lexer.advance();
        self.last_token = consumed;
        consumed
    }

    fn skip(&mut self, kind: TokenKind) -> bool {
        if self.peek(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.peek(kind) {
            let tok = self.current().clone();
            self.bump();
            Ok(tok)
        } else {
            Err(self.expected_error(&kind_description(kind)))
        }
    }

    fn expect_keyword(&mut self, value: &str) -> Result<(), SyntaxError> {
        if self.peek_keyword(value) {
            self.bump();
            Ok(())
        } else {
            Err(self.expected_error(&format!("{value:?}")))
        }
    }

    fn expect_optional_keyword(&mut self, value: &str) -> bool {
        if self.peek_keyword(value) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expected_error(&self, expected: &str) -> SyntaxError {
        SyntaxError::new(
            self.lexer.source().clone(),
            self.current().start,
            format!("Expected {expected}, found {}.", self.current().description()),
        )
    }

    fn unexpected_error(&self) -> SyntaxError {
        SyntaxError::new(
            self.lexer.source().clone(),
            self.current().start,
            format!("Unexpected {}.", self.current().description()),
        )
    }

    fn loc(&self, start: TokenId) -> Option<Location> {
        if self.no_location {
            return None;
        }
        let arena = self.lexer.arena();
        let start_tok = arena.get(start);
        let end_tok = arena.get(self.last_token);
        Some(Location {
            start: start_tok.start,
            end: end_tok.end,
            start_token: start,
            end_token: self.last_token,
            source: self.lexer.source().clone(),
        })
    }

    /// `many(open, item, close)`: `expect(open)`, one or more `item`s via
    /// `parse_fn`, until `close`.
    fn many<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        mut parse_fn: impl FnMut(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        self.expect_token(open)?;
        let mut items = vec![parse_fn(self)?];
        while !self.skip(close) {
            items.push(parse_fn(self)?);
        }
        Ok(items)
    }

    /// `any(open, item, close)`: `expect(open)`, zero or more `item`s, until
    /// `close`.
    fn any<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        mut parse_fn: impl FnMut(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        self.expect_token(open)?;
        let mut items = Vec::new();
        while !self.skip(close) {
            items.push(parse_fn(self)?);
        }
        Ok(items)
    }

    /// `optionalMany(open, item, close)`: behaves like `any` if `open` is
    /// present, otherwise returns empty without consuming anything.
    fn optional_many<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        parse_fn: impl FnMut(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        if self.peek(open) {
            self.many(open, close, parse_fn)
        } else {
            Ok(Vec::new())
        }
    }

    /// `delimitedMany(sep, item)`: one or more `item`s separated by `sep`,
    /// with an optional leading `sep`.
    fn delimited_many<T>(
        &mut self,
        sep: TokenKind,
        mut parse_fn: impl FnMut(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<Vec<T>, SyntaxError> {
        self.skip(sep);
        let mut items = vec![parse_fn(self)?];
        while self.skip(sep) {
            items.push(parse_fn(self)?);
        }
        Ok(items)
    }

    // --- names -------------------------------------------------------

    fn parse_name(&mut self) -> Result<Name, SyntaxError> {
        let start = self.current_id();
        let tok = self.expect_token(TokenKind::Name)?;
        Ok(Name {
            location: self.loc(start),
            value: tok.value.unwrap(),
        })
    }

    // --- document / definitions ---------------------------------------

    fn parse_document(&mut self) -> Result<Document, SyntaxError> {
        let start = self.current_id();
        self.expect_token(TokenKind::Sof)?;
        let mut definitions = vec![self.parse_definition()?];
        while !self.peek(TokenKind::Eof) {
            definitions.push(self.parse_definition()?);
        }
        self.expect_token(TokenKind::Eof)?;
        Ok(Document {
            location: self.loc(start),
            definitions,
        })
    }

    fn parse_definition(&mut self) -> Result<Definition, SyntaxError> {
        if self.peek(TokenKind::BraceOpen) {
            return Ok(Definition::Operation(self.parse_operation_definition()?));
        }

        if self.peek(TokenKind::Name) {
            match self.current().value.as_deref().unwrap() {
                "query" | "mutation" | "subscription" => {
                    return Ok(Definition::Operation(self.parse_operation_definition()?));
                }
                "fragment" => return Ok(Definition::Fragment(self.parse_fragment_definition()?)),
                "schema" | "scalar" | "type" | "interface" | "union" | "enum" | "input"
                | "directive" => {
                    return Ok(Definition::TypeSystem(
                        self.parse_type_system_definition()?,
                    ));
                }
                "extend" => {
                    return Ok(Definition::TypeSystem(TypeSystemDefinitionOrExtension::Extension(
                        self.parse_type_system_extension()?,
                    )));
                }
                _ => {}
            }
        }

        if self.peek(TokenKind::String) || self.peek(TokenKind::BlockString) {
            return Ok(Definition::TypeSystem(
                self.parse_type_system_definition()?,
            ));
        }

        Err(self.unexpected_error())
    }

    // --- executable: operations -----------------------------------------

    fn parse_operation_definition(&mut self) -> Result<OperationDefinition, SyntaxError> {
        let start = self.current_id();
        if self.peek(TokenKind::BraceOpen) {
            return Ok(OperationDefinition {
                location: self.loc(start),
                operation: OperationType::Query,
                name: None,
                variable_definitions: Vec::new(),
                directives: Vec::new(),
                selection_set: self.parse_selection_set()?,
            });
        }

        let operation = self.parse_operation_type()?;
        let name = if self.peek(TokenKind::Name) {
            Some(self.parse_name()?)
        } else {
            None
        };
        let variable_definitions = self.parse_variable_definitions()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        Ok(OperationDefinition {
            location: self.loc(start),
            operation,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }

    fn parse_operation_type(&mut self) -> Result<OperationType, SyntaxError> {
        let tok = self.expect_token(TokenKind::Name)?;
        match tok.value.as_deref() {
            Some("query") => Ok(OperationType::Query),
            Some("mutation") => Ok(OperationType::Mutation),
            Some("subscription") => Ok(OperationType::Subscription),
            _ => Err(SyntaxError::new(
                self.lexer.source().clone(),
                tok.start,
                "Expected operation type, found Name.".to_string(),
            )),
        }
    }

    fn parse_variable_definitions(&mut self) -> Result<Vec<VariableDefinition>, SyntaxError> {
        self.optional_many(TokenKind::ParenOpen, TokenKind::ParenClose, |p| {
            p.parse_variable_definition()
        })
    }

    fn parse_variable_definition(&mut self) -> Result<VariableDefinition, SyntaxError> {
        let start = self.current_id();
        self.expect_token(TokenKind::Dollar)?;
        let variable = self.parse_name()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type_reference()?;
        let default_value = if self.skip(TokenKind::Equals) {
            Some(self.parse_value_literal(true)?)
        } else {
            None
        };
        let directives = self.parse_directives(true)?;
        Ok(VariableDefinition {
            location: self.loc(start),
            variable,
            ty,
            default_value,
            directives,
        })
    }

    fn parse_directives(&mut self, is_const: bool) -> Result<Vec<Directive>, SyntaxError> {
        let mut directives = Vec::new();
        while self.peek(TokenKind::At) {
            directives.push(self.parse_directive(is_const)?);
        }
        Ok(directives)
    }

    fn parse_directive(&mut self, is_const: bool) -> Result<Directive, SyntaxError> {
        let start = self.current_id();
        self.expect_token(TokenKind::At)?;
        let name = self.parse_name()?;
        let arguments = self.parse_arguments(is_const)?;
        Ok(Directive {
            location: self.loc(start),
            name,
            arguments,
        })
    }

    fn parse_arguments(&mut self, is_const: bool) -> Result<Vec<Argument>, SyntaxError> {
        self.optional_many(TokenKind::ParenOpen, TokenKind::ParenClose, |p| {
            p.parse_argument(is_const)
        })
    }

    fn parse_argument(&mut self, is_const: bool) -> Result<Argument, SyntaxError> {
        let start = self.current_id();
        let name = self.parse_name()?;
        self.expect_token(TokenKind::Colon)?;
        let value = self.parse_value_literal(is_const)?;
        Ok(Argument {
            location: self.loc(start),
            name,
            value,
        })
    }

    // --- executable: selections ------------------------------------------

    fn parse_selection_set(&mut self) -> Result<SelectionSet, SyntaxError> {
        let start = self.current_id();
        let selections = self.many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
            p.parse_selection()
        })?;
        Ok(SelectionSet {
            location: self.loc(start),
            selections,
        })
    }

    fn parse_selection(&mut self) -> Result<Selection, SyntaxError> {
        if self.peek(TokenKind::Spread) {
            self.parse_fragment()
        } else {
            Ok(Selection::Field(self.parse_field()?))
        }
    }

    fn parse_field(&mut self) -> Result<Field, SyntaxError> {
        let start = self.current_id();
        let name_or_alias = self.parse_name()?;
        let (alias, name) = if self.skip(TokenKind::Colon) {
            (Some(name_or_alias), self.parse_name()?)
        } else {
            (None, name_or_alias)
        };
        let arguments = self.parse_arguments(false)?;
        let directives = self.parse_directives(false)?;
        let selection_set = if self.peek(TokenKind::BraceOpen) {
            Some(self.parse_selection_set()?)
        } else {
            None
        };
        Ok(Field {
            location: self.loc(start),
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    fn parse_fragment(&mut self) -> Result<Selection, SyntaxError> {
        let start = self.current_id();
        self.expect_token(TokenKind::Spread)?;
        if self.peek(TokenKind::Name) && !self.peek_keyword("on") {
            let fragment_name = self.parse_fragment_name()?;
            let directives = self.parse_directives(false)?;
            return Ok(Selection::FragmentSpread(FragmentSpread {
                location: self.loc(start),
                fragment_name,
                directives,
            }));
        }

        let type_condition = if self.expect_optional_keyword("on") {
            Some(self.parse_type_condition()?)
        } else {
            None
        };
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        Ok(Selection::InlineFragment(InlineFragment {
            location: self.loc(start),
            type_condition,
            directives,
            selection_set,
        }))
    }

    fn parse_fragment_definition(&mut self) -> Result<FragmentDefinition, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("fragment")?;
        let name = self.parse_fragment_name()?;
        self.expect_keyword("on")?;
        let type_condition = self.parse_type_condition()?;
        let directives = self.parse_directives(false)?;
        let selection_set = self.parse_selection_set()?;
        Ok(FragmentDefinition {
            location: self.loc(start),
            name,
            type_condition,
            directives,
            selection_set,
        })
    }

    fn parse_fragment_name(&mut self) -> Result<Name, SyntaxError> {
        if self.peek_keyword("on") {
            return Err(self.unexpected_error());
        }
        self.parse_name()
    }

    fn parse_type_condition(&mut self) -> Result<NamedTypeCondition, SyntaxError> {
        let start = self.current_id();
        let name = self.parse_named_type_name()?;
        Ok(NamedTypeCondition {
            location: self.loc(start),
            name,
        })
    }

    fn parse_named_type_name(&mut self) -> Result<Name, SyntaxError> {
        self.parse_name()
    }

    // --- values -----------------------------------------------------------

    fn parse_value_literal(&mut self, is_const: bool) -> Result<Value, SyntaxError> {
        let start = self.current_id();
        match self.current().kind {
            TokenKind::BracketOpen => self.parse_list_value(is_const),
            TokenKind::BraceOpen => self.parse_object_value(is_const),
            TokenKind::Int => {
                let tok = self.expect_token(TokenKind::Int)?;
                let raw = tok.value.unwrap();
                let value = raw.parse::<i64>().map_err(|_| {
                    SyntaxError::new(
                        self.lexer.source().clone(),
                        tok.start,
                        format!("Invalid Int value: {raw:?}."),
                    )
                })?;
                Ok(Value::Int(IntValue {
                    location: self.loc(start),
                    value,
                }))
            }
            TokenKind::Float => {
                let tok = self.expect_token(TokenKind::Float)?;
                let raw = tok.value.unwrap();
                let value = raw.parse::<f64>().map_err(|_| {
                    SyntaxError::new(
                        self.lexer.source().clone(),
                        tok.start,
                        format!("Invalid Float value: {raw:?}."),
                    )
                })?;
                Ok(Value::Float(FloatValue {
                    location: self.loc(start),
                    value,
                }))
            }
            TokenKind::String | TokenKind::BlockString => {
                Ok(Value::String(self.parse_string_literal()?))
            }
            TokenKind::Name => match self.current().value.as_deref() {
                Some("true") => {
                    self.bump();
                    Ok(Value::Boolean(BooleanValue {
                        location: self.loc(start),
                        value: true,
                    }))
                }
                Some("false") => {
                    self.bump();
                    Ok(Value::Boolean(BooleanValue {
                        location: self.loc(start),
                        value: false,
                    }))
                }
                Some("null") => {
                    self.bump();
                    Ok(Value::Null(NullValue {
                        location: self.loc(start),
                    }))
                }
                Some(_) => {
                    let name = self.parse_name()?;
                    Ok(Value::Enum(EnumValue {
                        location: self.loc(start),
                        value: name.value,
                    }))
                }
                None => Err(self.unexpected_error()),
            },
            TokenKind::Dollar if !is_const => {
                self.bump();
                let name = self.parse_name()?;
                Ok(Value::Variable(Variable {
                    location: self.loc(start),
                    name,
                }))
            }
            TokenKind::Dollar => Err(SyntaxError::new(
                self.lexer.source().clone(),
                self.current().start,
                "Unexpected variable in const context.".to_string(),
            )),
            _ => Err(self.unexpected_error()),
        }
    }

    fn parse_string_literal(&mut self) -> Result<StringValue, SyntaxError> {
        let start = self.current_id();
        let block = self.peek(TokenKind::BlockString);
        let tok = if block {
            self.expect_token(TokenKind::BlockString)?
        } else {
            self.expect_token(TokenKind::String)?
        };
        Ok(StringValue {
            location: self.loc(start),
            value: tok.value.unwrap(),
            block,
        })
    }

    fn parse_list_value(&mut self, is_const: bool) -> Result<Value, SyntaxError> {
        let start = self.current_id();
        let values = self.any(TokenKind::BracketOpen, TokenKind::BracketClose, |p| {
            p.parse_value_literal(is_const)
        })?;
        Ok(Value::List(ListValue {
            location: self.loc(start),
            values,
        }))
    }

    fn parse_object_value(&mut self, is_const: bool) -> Result<Value, SyntaxError> {
        let start = self.current_id();
        let fields = self.any(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
            p.parse_object_field(is_const)
        })?;
        Ok(Value::Object(ObjectValue {
            location: self.loc(start),
            fields,
        }))
    }

    fn parse_object_field(&mut self, is_const: bool) -> Result<ObjectField, SyntaxError> {
        let start = self.current_id();
        let name = self.parse_name()?;
        self.expect_token(TokenKind::Colon)?;
        let value = self.parse_value_literal(is_const)?;
        Ok(ObjectField {
            location: self.loc(start),
            name,
            value,
        })
    }

    // --- types --------------------------------------------------------

    fn parse_type_reference(&mut self) -> Result<Type, SyntaxError> {
        let start = self.current_id();
        let ty = if self.skip(TokenKind::BracketOpen) {
            let inner = self.parse_type_reference()?;
            self.expect_token(TokenKind::BracketClose)?;
            Type::List(Box::new(ListType {
                location: self.loc(start),
                inner,
            }))
        } else {
            Type::Named(self.parse_named_type()?)
        };

        if self.skip(TokenKind::Bang) {
            let inner = match ty {
                Type::Named(n) => NullableType::Named(n),
                Type::List(l) => NullableType::List(l),
                Type::NonNull(_) => unreachable!("a freshly parsed Type is never NonNull yet"),
            };
            Ok(Type::NonNull(Box::new(NonNullType {
                location: self.loc(start),
                inner,
            })))
        } else {
            Ok(ty)
        }
    }

    fn parse_named_type(&mut self) -> Result<NamedType, SyntaxError> {
        let start = self.current_id();
        let name = self.parse_name()?;
        Ok(NamedType {
            location: self.loc(start),
            name,
        })
    }

    // --- type system: descriptions, schema -------------------------------

    fn parse_description(&mut self) -> Result<Description, SyntaxError> {
        if self.peek(TokenKind::String) || self.peek(TokenKind::BlockString) {
            Ok(Some(self.parse_string_literal()?))
        } else {
            Ok(None)
        }
    }

    fn parse_type_system_definition(&mut self) -> Result<TypeSystemDefinitionOrExtension, SyntaxError> {
        // A description, if present, belongs to the definition that follows
        // it; peek past it (without consuming) to dispatch on the keyword.
        let keyword = if self.peek(TokenKind::String) || self.peek(TokenKind::BlockString) {
            self.lexer.lookahead().value.clone()
        } else {
            self.current().value.clone()
        };

        match keyword.as_deref() {
            Some("schema") => Ok(TypeSystemDefinitionOrExtension::Schema(
                self.parse_schema_definition()?,
            )),
            Some("scalar") => Ok(TypeSystemDefinitionOrExtension::Scalar(
                self.parse_scalar_type_definition()?,
            )),
            Some("type") => Ok(TypeSystemDefinitionOrExtension::Object(
                self.parse_object_type_definition()?,
            )),
            Some("interface") => Ok(TypeSystemDefinitionOrExtension::Interface(
                self.parse_interface_type_definition()?,
            )),
            Some("union") => Ok(TypeSystemDefinitionOrExtension::Union(
                self.parse_union_type_definition()?,
            )),
            Some("enum") => Ok(TypeSystemDefinitionOrExtension::Enum(
                self.parse_enum_type_definition()?,
            )),
            Some("input") => Ok(TypeSystemDefinitionOrExtension::InputObject(
                self.parse_input_object_type_definition()?,
            )),
            Some("directive") => Ok(TypeSystemDefinitionOrExtension::Directive(
                self.parse_directive_definition()?,
            )),
            _ => Err(self.unexpected_error()),
        }
    }

    fn parse_type_system_extension(&mut self) -> Result<TypeExtension, SyntaxError> {
        let next = self.lexer.lookahead().value.clone();
        match next.as_deref() {
            Some("schema") => Ok(TypeExtension::Schema(self.parse_schema_extension()?)),
            Some("scalar") => Ok(TypeExtension::Scalar(self.parse_scalar_type_extension()?)),
            Some("type") => Ok(TypeExtension::Object(self.parse_object_type_extension()?)),
            Some("interface") => Ok(TypeExtension::Interface(self.parse_interface_type_extension()?)),
            Some("union") => Ok(TypeExtension::Union(self.parse_union_type_extension()?)),
            Some("enum") => Ok(TypeExtension::Enum(self.parse_enum_type_extension()?)),
            Some("input") => Ok(TypeExtension::InputObject(self.parse_input_object_type_extension()?)),
            _ => Err(self.unexpected_error()),
        }
    }

    fn parse_operation_type_definition(&mut self) -> Result<RootOperationTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let operation = self.parse_operation_kind()?;
        self.expect_token(TokenKind::Colon)?;
        let named_type = self.parse_named_type_name()?;
        Ok(RootOperationTypeDefinition {
            location: self.loc(start),
            operation,
            named_type,
        })
    }

    fn parse_operation_kind(&mut self) -> Result<OperationKind, SyntaxError> {
        let tok = self.expect_token(TokenKind::Name)?;
        match tok.value.as_deref() {
            Some("query") => Ok(OperationKind::Query),
            Some("mutation") => Ok(OperationKind::Mutation),
            Some("subscription") => Ok(OperationKind::Subscription),
            _ => Err(SyntaxError::new(
                self.lexer.source().clone(),
                tok.start,
                "Expected operation type, found Name.".to_string(),
            )),
        }
    }

    fn parse_schema_definition(&mut self) -> Result<SchemaDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("schema")?;
        let directives = self.parse_directives(true)?;
        let root_operation_types =
            self.many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
                p.parse_operation_type_definition()
            })?;
        Ok(SchemaDefinition {
            location: self.loc(start),
            description,
            directives,
            root_operation_types,
        })
    }

    fn parse_schema_extension(&mut self) -> Result<SchemaExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("schema")?;
        let directives = self.parse_directives(true)?;
        let root_operation_types = if self.peek(TokenKind::BraceOpen) {
            self.many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
                p.parse_operation_type_definition()
            })?
        } else {
            Vec::new()
        };
        if directives.is_empty() && root_operation_types.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(SchemaExtension {
            location: self.loc(start),
            directives,
            root_operation_types,
        })
    }

    fn parse_scalar_type_definition(&mut self) -> Result<ScalarTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("scalar")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        Ok(ScalarTypeDefinition {
            location: self.loc(start),
            description,
            name,
            directives,
        })
    }

    fn parse_scalar_type_extension(&mut self) -> Result<ScalarTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("scalar")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        if directives.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(ScalarTypeExtension {
            location: self.loc(start),
            name,
            directives,
        })
    }

    fn parse_implements_interfaces(&mut self) -> Result<Vec<Name>, SyntaxError> {
        if !self.expect_optional_keyword("implements") {
            return Ok(Vec::new());
        }
        self.delimited_many(TokenKind::Ampersand, |p| p.parse_named_type_name())
    }

    fn parse_fields_definition(&mut self) -> Result<Vec<FieldDefinition>, SyntaxError> {
        self.optional_many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
            p.parse_field_definition()
        })
    }

    fn parse_field_definition(&mut self) -> Result<FieldDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_defs()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type_reference()?;
        let directives = self.parse_directives(true)?;
        Ok(FieldDefinition {
            location: self.loc(start),
            description,
            name,
            arguments,
            ty,
            directives,
        })
    }

    fn parse_argument_defs(&mut self) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        self.optional_many(TokenKind::ParenOpen, TokenKind::ParenClose, |p| {
            p.parse_input_value_def()
        })
    }

    fn parse_input_value_def(&mut self) -> Result<InputValueDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        let name = self.parse_name()?;
        self.expect_token(TokenKind::Colon)?;
        let ty = self.parse_type_reference()?;
        let default_value = if self.skip(TokenKind::Equals) {
            Some(self.parse_value_literal(true)?)
        } else {
            None
        };
        let directives = self.parse_directives(true)?;
        Ok(InputValueDefinition {
            location: self.loc(start),
            description,
            name,
            ty,
            default_value,
            directives,
        })
    }

    fn parse_object_type_definition(&mut self) -> Result<ObjectTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("type")?;
        let name = self.parse_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        Ok(ObjectTypeDefinition {
            location: self.loc(start),
            description,
            name,
            interfaces,
            directives,
            fields,
        })
    }

    fn parse_object_type_extension(&mut self) -> Result<ObjectTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("type")?;
        let name = self.parse_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        if interfaces.is_empty() && directives.is_empty() && fields.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(ObjectTypeExtension {
            location: self.loc(start),
            name,
            interfaces,
            directives,
            fields,
        })
    }

    fn parse_interface_type_definition(&mut self) -> Result<InterfaceTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("interface")?;
        let name = self.parse_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        Ok(InterfaceTypeDefinition {
            location: self.loc(start),
            description,
            name,
            interfaces,
            directives,
            fields,
        })
    }

    fn parse_interface_type_extension(&mut self) -> Result<InterfaceTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("interface")?;
        let name = self.parse_name()?;
        let interfaces = self.parse_implements_interfaces()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_fields_definition()?;
        if interfaces.is_empty() && directives.is_empty() && fields.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(InterfaceTypeExtension {
            location: self.loc(start),
            name,
            interfaces,
            directives,
            fields,
        })
    }

    fn parse_union_type_definition(&mut self) -> Result<UnionTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("union")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let member_types = self.parse_union_member_types()?;
        Ok(UnionTypeDefinition {
            location: self.loc(start),
            description,
            name,
            directives,
            member_types,
        })
    }

    fn parse_union_type_extension(&mut self) -> Result<UnionTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("union")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let member_types = self.parse_union_member_types()?;
        if directives.is_empty() && member_types.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(UnionTypeExtension {
            location: self.loc(start),
            name,
            directives,
            member_types,
        })
    }

    fn parse_union_member_types(&mut self) -> Result<Vec<Name>, SyntaxError> {
        if !self.skip(TokenKind::Equals) {
            return Ok(Vec::new());
        }
        self.delimited_many(TokenKind::Pipe, |p| p.parse_named_type_name())
    }

    fn parse_enum_type_definition(&mut self) -> Result<EnumTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("enum")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let values = self.parse_enum_values_definition()?;
        Ok(EnumTypeDefinition {
            location: self.loc(start),
            description,
            name,
            directives,
            values,
        })
    }

    fn parse_enum_type_extension(&mut self) -> Result<EnumTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("enum")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let values = self.parse_enum_values_definition()?;
        if directives.is_empty() && values.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(EnumTypeExtension {
            location: self.loc(start),
            name,
            directives,
            values,
        })
    }

    fn parse_enum_values_definition(&mut self) -> Result<Vec<EnumValueDefinition>, SyntaxError> {
        self.optional_many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
            p.parse_enum_value_definition()
        })
    }

    fn parse_enum_value_definition(&mut self) -> Result<EnumValueDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        let value = self.parse_enum_value_name()?;
        let directives = self.parse_directives(true)?;
        Ok(EnumValueDefinition {
            location: self.loc(start),
            description,
            value,
            directives,
        })
    }

    fn parse_enum_value_name(&mut self) -> Result<Name, SyntaxError> {
        if self.peek_keyword("true") || self.peek_keyword("false") || self.peek_keyword("null") {
            return Err(self.unexpected_error());
        }
        self.parse_name()
    }

    fn parse_input_object_type_definition(
        &mut self,
    ) -> Result<InputObjectTypeDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("input")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_input_fields_definition()?;
        Ok(InputObjectTypeDefinition {
            location: self.loc(start),
            description,
            name,
            directives,
            fields,
        })
    }

    fn parse_input_object_type_extension(
        &mut self,
    ) -> Result<InputObjectTypeExtension, SyntaxError> {
        let start = self.current_id();
        self.expect_keyword("extend")?;
        self.expect_keyword("input")?;
        let name = self.parse_name()?;
        let directives = self.parse_directives(true)?;
        let fields = self.parse_input_fields_definition()?;
        if directives.is_empty() && fields.is_empty() {
            return Err(self.unexpected_error());
        }
        Ok(InputObjectTypeExtension {
            location: self.loc(start),
            name,
            directives,
            fields,
        })
    }

    fn parse_input_fields_definition(&mut self) -> Result<Vec<InputValueDefinition>, SyntaxError> {
        self.optional_many(TokenKind::BraceOpen, TokenKind::BraceClose, |p| {
            p.parse_input_value_def()
        })
    }

    fn parse_directive_definition(&mut self) -> Result<DirectiveDefinition, SyntaxError> {
        let start = self.current_id();
        let description = self.parse_description()?;
        self.expect_keyword("directive")?;
        self.expect_token(TokenKind::At)?;
        let name = self.parse_name()?;
        let arguments = self.parse_argument_defs()?;
        let repeatable = self.expect_optional_keyword("repeatable");
        self.expect_keyword("on")?;
        let locations = self.parse_directive_locations()?;
        Ok(DirectiveDefinition {
            location: self.loc(start),
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_locations(&mut self) -> Result<Vec<DirectiveLocation>, SyntaxError> {
        self.delimited_many(TokenKind::Pipe, |p| p.parse_directive_location())
    }

    fn parse_directive_location(&mut self) -> Result<DirectiveLocation, SyntaxError> {
        let tok = self.expect_token(TokenKind::Name)?;
        let value = tok.value.as_deref().unwrap_or_default();
        use DirectiveLocation::*;
        let location = match value {
            "QUERY" => Query,
            "MUTATION" => Mutation,
            "SUBSCRIPTION" => Subscription,
            "FIELD" => Field,
            "FRAGMENT_DEFINITION" => FragmentDefinition,
            "FRAGMENT_SPREAD" => FragmentSpread,
            "INLINE_FRAGMENT" => InlineFragment,
            "VARIABLE_DEFINITION" => VariableDefinition,
            "SCHEMA" => Schema,
            "SCALAR" => Scalar,
            "OBJECT" => Object,
            "FIELD_DEFINITION" => FieldDefinition,
            "ARGUMENT_DEFINITION" => ArgumentDefinition,
            "INTERFACE" => Interface,
            "UNION" => Union,
            "ENUM" => Enum,
            "ENUM_VALUE" => EnumValue,
            "INPUT_OBJECT" => InputObject,
            "INPUT_FIELD_DEFINITION" => InputFieldDefinition,
            _ => {
                return Err(SyntaxError::new(
                    self.lexer.source().clone(),
                    tok.start,
                    format!("Unexpected directive location: {value:?}."),
                ))
            }
        };
        Ok(location)
    }
}

fn kind_description(kind: TokenKind) -> String {
    match kind.punctuator_str() {
        Some(s) if !matches!(kind, TokenKind::Sof | TokenKind::Eof) => format!("{s:?}"),
        Some(s) => s.to_string(),
        None => match kind {
            TokenKind::Name => "Name".to_string(),
            TokenKind::Int => "Int".to_string(),
            TokenKind::Float => "Float".to_string(),
            TokenKind::String | TokenKind::BlockString => "String".to_string(),
            other => format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Document {
        parse(src, ParserOptions::default()).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn short_form_query() {
        let doc = parse_ok("{ hello }");
        assert_eq!(doc.definitions.len(), 1);
        match &doc.definitions[0] {
            Definition::Operation(op) => {
                assert_eq!(op.operation, OperationType::Query);
                assert!(op.name.is_none());
                assert_eq!(op.selection_set.selections.len(), 1);
            }
            other => panic!("expected operation, got {other:?}"),
        }
    }

    #[test]
    fn field_alias_arguments_directives() {
        let doc = parse_ok(r#"{ a: name(id: 1) @skip(if: true) }"#);
        let Definition::Operation(op) = &doc.definitions[0] else {
            panic!("expected operation")
        };
        let Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected field")
        };
        assert_eq!(field.alias.as_ref().unwrap().value, "a");
        assert_eq!(field.name.value, "name");
        assert_eq!(field.arguments.len(), 1);
        assert_eq!(field.directives.len(), 1);
    }

    #[test]
    fn fragment_spread_vs_inline_fragment_vs_definition() {
        let doc = parse_ok(
            "{ ...Frag ... on T { x } } fragment Frag on T { y }",
        );
        let Definition::Operation(op) = &doc.definitions[0] else {
            panic!()
        };
        assert!(matches!(op.selection_set.selections[0], Selection::FragmentSpread(_)));
        assert!(matches!(op.selection_set.selections[1], Selection::InlineFragment(_)));
        assert!(matches!(doc.definitions[1], Definition::Fragment(_)));
    }

    #[test]
    fn non_null_list_type_grammar() {
        let ty = parse_type("[String!]!", ParserOptions::default()).unwrap();
        match ty {
            Type::NonNull(nn) => match nn.inner {
                NullableType::List(list) => {
                    assert!(matches!(list.inner, Type::NonNull(_)));
                }
                other => panic!("expected list, got {other:?}"),
            },
            other => panic!("expected non-null, got {other:?}"),
        }
    }

    #[test]
    fn object_type_with_interfaces_and_description() {
        let doc = parse_ok(
            r#"
            "A thing"
            type Thing implements Node & Named {
              id: ID!
              name: String
            }
            "#,
        );
        match &doc.definitions[0] {
            Definition::TypeSystem(TypeSystemDefinitionOrExtension::Object(obj)) => {
                assert_eq!(obj.name.value, "Thing");
                assert_eq!(obj.interfaces.len(), 2);
                assert_eq!(obj.fields.len(), 2);
                assert_eq!(obj.description.as_ref().unwrap().value, "A thing");
            }
            other => panic!("expected object type, got {other:?}"),
        }
    }

    #[test]
    fn directive_definition_repeatable_and_locations() {
        let doc = parse_ok("directive @cached(ttl: Int) repeatable on FIELD | OBJECT");
        match &doc.definitions[0] {
            Definition::TypeSystem(TypeSystemDefinitionOrExtension::Directive(d)) => {
                assert!(d.repeatable);
                assert_eq!(d.locations.len(), 2);
                assert_eq!(d.arguments.len(), 1);
            }
            other => panic!("expected directive definition, got {other:?}"),
        }
    }

    #[test]
    fn schema_extension_requires_nonempty_body() {
        let err = parse("extend schema", ParserOptions::default()).unwrap_err();
        assert!(err.message.contains("Unexpected"));
    }

    #[test]
    fn block_string_description() {
        let doc = parse_ok("\"\"\"\n  A scalar\n  \"\"\"\nscalar Foo");
        match &doc.definitions[0] {
            Definition::TypeSystem(TypeSystemDefinitionOrExtension::Scalar(s)) => {
                assert_eq!(s.description.as_ref().unwrap().value, "A scalar");
                assert!(s.description.as_ref().unwrap().block);
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn union_member_types() {
        let doc = parse_ok("union SearchResult = Human | Droid | Starship");
        match &doc.definitions[0] {
            Definition::TypeSystem(TypeSystemDefinitionOrExtension::Union(u)) => {
                assert_eq!(u.member_types.len(), 3);
            }
            other => panic!("expected union, got {other:?}"),
        }
    }

    #[test]
    fn input_object_with_default_value() {
        let doc = parse_ok("input Filter { limit: Int = 10 }");
        match &doc.definitions[0] {
            Definition::TypeSystem(TypeSystemDefinitionOrExtension::InputObject(io)) => {
                assert_eq!(io.fields.len(), 1);
                assert!(io.fields[0].default_value.is_some());
            }
            other => panic!("expected input object, got {other:?}"),
        }
    }

    #[test]
    fn variable_with_default_and_directive() {
        let doc = parse_ok("query($x: Int = 1 @foo) { a }");
        let Definition::Operation(op) = &doc.definitions[0] else {
            panic!()
        };
        assert_eq!(op.variable_definitions.len(), 1);
        assert!(op.variable_definitions[0].default_value.is_some());
        assert_eq!(op.variable_definitions[0].directives.len(), 1);
    }

    #[test]
    fn location_spans_start_to_end() {
        let doc = parse("{ a }", ParserOptions::default()).unwrap();
        let loc = doc.location.as_ref().unwrap();
        assert_eq!(loc.start, 0);
        assert_eq!(loc.end, 5);
    }

    #[test]
    fn no_location_option_suppresses_locations() {
        let doc = parse(
            "{ a }",
            ParserOptions {
                no_location: true,
                instrumentation: None,
            },
        )
        .unwrap();
        assert!(doc.location.is_none());
        let Definition::Operation(op) = &doc.definitions[0] else {
            panic!()
        };
        assert!(op.selection_set.location.is_none());
    }

    #[test]
    fn unterminated_selection_set_is_a_syntax_error() {
        let err = parse("{ a", ParserOptions::default()).unwrap_err();
        assert!(err.message.contains("Expected"));
    }
}
