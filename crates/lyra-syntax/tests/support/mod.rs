//! A miniature Lyra parser for integration tests.
//!
//! Production code never parses; it consumes whatever tagged tree the host
//! parser produced. The tests still need trees, so this module lexes and
//! parses enough of the language to cover the constructs under test. It is
//! deliberately strict: unexpected input panics, which in a test is exactly
//! the signal we want.

#![allow(dead_code)]

use lyra_syntax::{Checkpoint, Expr, Node, SourceFile, SyntaxKind, SyntaxTree, TreeBuilder};

pub fn parse(source: &str) -> SyntaxTree {
    let tokens = Lexer::new(source).run();
    Parser::new(&tokens).parse_file()
}

/// The first expression in statement position at the top of the file.
pub fn first_expr(tree: &SyntaxTree) -> Expr<'_> {
    Node::root(tree)
        .find_child_map(Expr::cast)
        .expect("no top-level expression")
}

pub fn source_file(tree: &SyntaxTree) -> SourceFile<'_> {
    SourceFile::of(tree)
}

/// All nodes of the tree in document (preorder) order, tokens included.
pub fn preorder(tree: &SyntaxTree) -> Vec<Node<'_>> {
    fn walk<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
        out.push(node);
        for child in node.children() {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    walk(Node::root(tree), &mut out);
    out
}

/// The first node castable by `cast`, preorder.
pub fn find<'t, T>(tree: &'t SyntaxTree, cast: impl Fn(Node<'t>) -> Option<T>) -> T {
    preorder(tree)
        .into_iter()
        .find_map(cast)
        .expect("no matching node in tree")
}

pub fn find_all<'t, T>(tree: &'t SyntaxTree, cast: impl Fn(Node<'t>) -> Option<T>) -> Vec<T> {
    preorder(tree).into_iter().filter_map(cast).collect()
}

// =============================================================================
// Lexer
// =============================================================================

#[derive(Clone, Debug)]
struct Tok {
    kind: SyntaxKind,
    text: String,
}

struct Lexer {
    src: Vec<char>,
    pos: usize,
    toks: Vec<Tok>,
}

impl Lexer {
    fn new(source: &str) -> Lexer {
        Lexer {
            src: source.chars().collect(),
            pos: 0,
            toks: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Tok> {
        while self.pos < self.src.len() {
            self.next_token();
        }
        self.toks
    }

    fn at(&self, offset: usize) -> char {
        self.src.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn push(&mut self, kind: SyntaxKind, len: usize) {
        let text: String = self.src[self.pos..self.pos + len].iter().collect();
        self.pos += len;
        self.toks.push(Tok { kind, text });
    }

    fn push_text(&mut self, kind: SyntaxKind, text: String) {
        self.toks.push(Tok { kind, text });
    }

    fn next_token(&mut self) {
        let c = self.at(0);
        if c.is_whitespace() {
            let mut len = 0;
            while self.at(len).is_whitespace() && self.pos + len < self.src.len() {
                len += 1;
            }
            self.push(SyntaxKind::Whitespace, len);
            return;
        }
        if c == '/' && self.at(1) == '/' {
            let mut len = 2;
            while self.pos + len < self.src.len() && self.at(len) != '\n' {
                len += 1;
            }
            self.push(SyntaxKind::EolComment, len);
            return;
        }
        if c == '/' && self.at(1) == '*' {
            let mut len = 2;
            while self.pos + len < self.src.len() && !(self.at(len) == '*' && self.at(len + 1) == '/') {
                len += 1;
            }
            self.push(SyntaxKind::BlockComment, len + 2);
            return;
        }
        if c == '"' {
            self.lex_string();
            return;
        }
        if c == '\'' {
            let len = if self.at(1) == '\\' { 4 } else { 3 };
            self.push(SyntaxKind::CharacterLiteral, len);
            return;
        }
        if c.is_ascii_digit() {
            let mut len = 0;
            let mut is_float = false;
            while self.at(len).is_ascii_digit() {
                len += 1;
            }
            if self.at(len) == '.' && self.at(len + 1).is_ascii_digit() {
                is_float = true;
                len += 1;
                while self.at(len).is_ascii_digit() {
                    len += 1;
                }
            }
            let kind = if is_float {
                SyntaxKind::FloatLiteral
            } else {
                SyntaxKind::IntegerLiteral
            };
            self.push(kind, len);
            return;
        }
        if c.is_alphabetic() || c == '_' {
            let mut len = 0;
            while self.at(len).is_alphanumeric() || self.at(len) == '_' {
                len += 1;
            }
            let word: String = self.src[self.pos..self.pos + len].iter().collect();
            if word == "as" && self.at(len) == '?' {
                self.push(SyntaxKind::AsSafe, len + 1);
                return;
            }
            self.push(keyword_kind(&word).unwrap_or(SyntaxKind::Identifier), len);
            return;
        }
        match c {
            '!' => {
                if self.at(1) == '=' && self.at(2) == '=' {
                    self.push(SyntaxKind::ExclEqEqEq, 3);
                } else if self.at(1) == '=' {
                    self.push(SyntaxKind::ExclEq, 2);
                } else if self.at(1) == '!' {
                    self.push(SyntaxKind::ExclExcl, 2);
                } else if self.word_follows(1, "in") {
                    self.push(SyntaxKind::NotIn, 3);
                } else if self.word_follows(1, "is") {
                    self.push(SyntaxKind::NotIs, 3);
                } else {
                    self.push(SyntaxKind::Excl, 1);
                }
            }
            '=' => {
                if self.at(1) == '=' && self.at(2) == '=' {
                    self.push(SyntaxKind::EqEqEq, 3);
                } else if self.at(1) == '=' {
                    self.push(SyntaxKind::EqEq, 2);
                } else {
                    self.push(SyntaxKind::Eq, 1);
                }
            }
            '+' => match self.at(1) {
                '=' => self.push(SyntaxKind::PlusEq, 2),
                '+' => self.push(SyntaxKind::PlusPlus, 2),
                _ => self.push(SyntaxKind::Plus, 1),
            },
            '-' => match self.at(1) {
                '=' => self.push(SyntaxKind::MinusEq, 2),
                '-' => self.push(SyntaxKind::MinusMinus, 2),
                '>' => self.push(SyntaxKind::Arrow, 2),
                _ => self.push(SyntaxKind::Minus, 1),
            },
            '*' => {
                if self.at(1) == '=' {
                    self.push(SyntaxKind::MultEq, 2);
                } else {
                    self.push(SyntaxKind::Mul, 1);
                }
            }
            '/' => {
                if self.at(1) == '=' {
                    self.push(SyntaxKind::DivEq, 2);
                } else {
                    self.push(SyntaxKind::Div, 1);
                }
            }
            '%' => {
                if self.at(1) == '=' {
                    self.push(SyntaxKind::PercEq, 2);
                } else {
                    self.push(SyntaxKind::Perc, 1);
                }
            }
            '<' => {
                if self.at(1) == '=' {
                    self.push(SyntaxKind::LtEq, 2);
                } else {
                    self.push(SyntaxKind::Lt, 1);
                }
            }
            '>' => {
                if self.at(1) == '=' {
                    self.push(SyntaxKind::GtEq, 2);
                } else {
                    self.push(SyntaxKind::Gt, 1);
                }
            }
            '&' if self.at(1) == '&' => self.push(SyntaxKind::AndAnd, 2),
            '|' if self.at(1) == '|' => self.push(SyntaxKind::OrOr, 2),
            '?' => match self.at(1) {
                '.' => self.push(SyntaxKind::SafeAccess, 2),
                ':' => self.push(SyntaxKind::Elvis, 2),
                _ => self.push(SyntaxKind::Quest, 1),
            },
            '.' => {
                if self.at(1) == '.' {
                    self.push(SyntaxKind::Range, 2);
                } else {
                    self.push(SyntaxKind::Dot, 1);
                }
            }
            ':' => {
                if self.at(1) == ':' {
                    self.push(SyntaxKind::ColonColon, 2);
                } else {
                    self.push(SyntaxKind::Colon, 1);
                }
            }
            '(' => self.push(SyntaxKind::LPar, 1),
            ')' => self.push(SyntaxKind::RPar, 1),
            '{' => self.push(SyntaxKind::LBrace, 1),
            '}' => self.push(SyntaxKind::RBrace, 1),
            '[' => self.push(SyntaxKind::LBracket, 1),
            ']' => self.push(SyntaxKind::RBracket, 1),
            ',' => self.push(SyntaxKind::Comma, 1),
            ';' => self.push(SyntaxKind::Semicolon, 1),
            '@' => self.push(SyntaxKind::At, 1),
            other => panic!("unlexable character {other:?}"),
        }
    }

    fn word_follows(&self, offset: usize, word: &str) -> bool {
        let mut i = offset;
        for expected in word.chars() {
            if self.at(i) != expected {
                return false;
            }
            i += 1;
        }
        !(self.at(i).is_alphanumeric() || self.at(i) == '_')
    }

    fn lex_string(&mut self) {
        self.push(SyntaxKind::OpenQuote, 1);
        loop {
            match self.at(0) {
                '\0' => panic!("unterminated string"),
                '"' => {
                    self.push(SyntaxKind::ClosingQuote, 1);
                    return;
                }
                '\\' => self.push(SyntaxKind::EscapeSequence, 2),
                '$' if self.at(1) == '{' => {
                    self.push(SyntaxKind::LongTemplateEntryStart, 2);
                    let mut depth = 0usize;
                    loop {
                        match self.at(0) {
                            '\0' => panic!("unterminated template entry"),
                            '}' if depth == 0 => {
                                self.push(SyntaxKind::RBrace, 1);
                                break;
                            }
                            '}' => {
                                depth -= 1;
                                self.push(SyntaxKind::RBrace, 1);
                            }
                            '{' => {
                                depth += 1;
                                self.push(SyntaxKind::LBrace, 1);
                            }
                            _ => self.next_token(),
                        }
                    }
                }
                '$' if self.at(1).is_alphabetic() || self.at(1) == '_' => {
                    self.push(SyntaxKind::ShortTemplateEntryStart, 1);
                    let mut len = 0;
                    while self.at(len).is_alphanumeric() || self.at(len) == '_' {
                        len += 1;
                    }
                    self.push(SyntaxKind::Identifier, len);
                }
                _ => {
                    let mut text = String::new();
                    while self.pos < self.src.len() {
                        let c = self.at(0);
                        if c == '"' || c == '\\' || (c == '$' && (self.at(1) == '{' || self.at(1).is_alphabetic() || self.at(1) == '_')) {
                            break;
                        }
                        text.push(c);
                        self.pos += 1;
                    }
                    self.push_text(SyntaxKind::RegularStringPart, text);
                }
            }
        }
    }
}

fn keyword_kind(word: &str) -> Option<SyntaxKind> {
    let kind = match word {
        "package" => SyntaxKind::PackageKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "fun" => SyntaxKind::FunKeyword,
        "val" => SyntaxKind::ValKeyword,
        "var" => SyntaxKind::VarKeyword,
        "typealias" => SyntaxKind::TypealiasKeyword,
        "constructor" => SyntaxKind::ConstructorKeyword,
        "init" => SyntaxKind::InitKeyword,
        "companion" => SyntaxKind::CompanionKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "super" => SyntaxKind::SuperKeyword,
        "if" => SyntaxKind::IfKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "when" => SyntaxKind::WhenKeyword,
        "for" => SyntaxKind::ForKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "do" => SyntaxKind::DoKeyword,
        "try" => SyntaxKind::TryKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "break" => SyntaxKind::BreakKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "is" => SyntaxKind::IsKeyword,
        "in" => SyntaxKind::InKeyword,
        "as" => SyntaxKind::AsKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "null" => SyntaxKind::NullKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "internal" => SyntaxKind::InternalKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "abstract" => SyntaxKind::AbstractKeyword,
        "final" => SyntaxKind::FinalKeyword,
        "open" => SyntaxKind::OpenKeyword,
        "override" => SyntaxKind::OverrideKeyword,
        "inline" => SyntaxKind::InlineKeyword,
        "const" => SyntaxKind::ConstKeyword,
        _ => return None,
    };
    Some(kind)
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'a> {
    toks: &'a [Tok],
    pos: usize,
    b: TreeBuilder,
}

/// Binding strength of a binary operator; higher binds tighter. Assignment
/// is 0 and right-associative.
fn binary_strength(kind: SyntaxKind) -> Option<u8> {
    let strength = match kind {
        SyntaxKind::Eq
        | SyntaxKind::PlusEq
        | SyntaxKind::MinusEq
        | SyntaxKind::MultEq
        | SyntaxKind::DivEq
        | SyntaxKind::PercEq => 0,
        SyntaxKind::OrOr => 1,
        SyntaxKind::AndAnd => 2,
        SyntaxKind::EqEq | SyntaxKind::ExclEq | SyntaxKind::EqEqEq | SyntaxKind::ExclEqEqEq => 3,
        SyntaxKind::Lt | SyntaxKind::Gt | SyntaxKind::LtEq | SyntaxKind::GtEq => 4,
        SyntaxKind::InKeyword | SyntaxKind::NotIn | SyntaxKind::IsKeyword | SyntaxKind::NotIs => 5,
        SyntaxKind::Elvis => 6,
        SyntaxKind::Identifier => 7,
        SyntaxKind::Range => 8,
        SyntaxKind::Plus | SyntaxKind::Minus => 9,
        SyntaxKind::Mul | SyntaxKind::Div | SyntaxKind::Perc => 10,
        SyntaxKind::AsKeyword | SyntaxKind::AsSafe => 11,
        _ => return None,
    };
    Some(strength)
}

fn can_start_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier
            | SyntaxKind::IntegerLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::CharacterLiteral
            | SyntaxKind::OpenQuote
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::LPar
            | SyntaxKind::LBrace
            | SyntaxKind::LBracket
            | SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::WhenKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Excl
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus
            | SyntaxKind::ColonColon
            | SyntaxKind::At
    )
}

impl<'a> Parser<'a> {
    fn new(toks: &'a [Tok]) -> Parser<'a> {
        Parser {
            toks,
            pos: 0,
            b: TreeBuilder::new(),
        }
    }

    // --- token machinery ---------------------------------------------------

    /// Index of the n-th non-trivia token at or after the cursor.
    fn sig_index(&self, n: usize) -> Option<usize> {
        let mut remaining = n;
        let mut i = self.pos;
        while i < self.toks.len() {
            if !self.toks[i].kind.is_trivia() {
                if remaining == 0 {
                    return Some(i);
                }
                remaining -= 1;
            }
            i += 1;
        }
        None
    }

    fn peek(&self) -> Option<SyntaxKind> {
        self.sig_index(0).map(|i| self.toks[i].kind)
    }

    fn peek2(&self) -> Option<SyntaxKind> {
        self.sig_index(1).map(|i| self.toks[i].kind)
    }

    fn peek_text(&self) -> &str {
        self.sig_index(0).map_or("", |i| &self.toks[i].text)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Whether the next significant token is glued to the one before it,
    /// with no trivia in between. Used for label syntax (`loop@`, `@outer`).
    fn next_is_adjacent(&self) -> bool {
        self.sig_index(0) == Some(self.pos)
    }

    /// Whether any trivia before the next significant token contains a
    /// newline. Statement-shaped decisions (infix identifiers, call
    /// parentheses) refuse to cross one.
    fn newline_before(&self) -> bool {
        let end = self.sig_index(0).unwrap_or(self.toks.len());
        self.toks[self.pos..end]
            .iter()
            .any(|t| t.text.contains('\n'))
    }

    fn flush_trivia(&mut self) {
        while self.pos < self.toks.len() && self.toks[self.pos].kind.is_trivia() {
            let tok = &self.toks[self.pos];
            self.b.token(tok.kind, &tok.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.flush_trivia();
        let tok = self.toks.get(self.pos).expect("bump at end of input");
        self.b.token(tok.kind, &tok.text);
        self.pos += 1;
    }

    fn expect(&mut self, kind: SyntaxKind) {
        assert!(
            self.at(kind),
            "expected {kind:?}, found {:?} ({:?})",
            self.peek(),
            self.peek_text()
        );
        self.bump();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn start(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.b.start_node(kind);
    }

    fn finish(&mut self) {
        self.b.finish_node();
    }

    fn cp(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.b.checkpoint()
    }

    // --- file structure ----------------------------------------------------

    fn parse_file(mut self) -> SyntaxTree {
        self.b.start_node(SyntaxKind::SourceFile);
        if self.at(SyntaxKind::PackageKeyword) {
            self.start(SyntaxKind::PackageDirective);
            self.bump();
            self.parse_dotted_reference();
            self.finish();
        }
        if self.at(SyntaxKind::ImportKeyword) {
            self.start(SyntaxKind::ImportList);
            while self.at(SyntaxKind::ImportKeyword) {
                self.parse_import();
            }
            self.finish();
        }
        while self.peek().is_some() {
            if self.at_declaration() {
                self.parse_declaration();
            } else {
                self.parse_expression();
            }
            self.eat(SyntaxKind::Semicolon);
        }
        self.flush_trivia();
        self.b.finish_node();
        self.b.finish()
    }

    /// `a` or `a.b.c` as reference / dot-qualified expressions.
    fn parse_dotted_reference(&mut self) {
        let cp = self.cp();
        self.parse_ref();
        while self.at(SyntaxKind::Dot) && self.peek2() == Some(SyntaxKind::Identifier) {
            self.b.start_node_at(cp, SyntaxKind::DotQualifiedExpression);
            self.bump();
            self.parse_ref();
            self.finish();
        }
    }

    fn parse_ref(&mut self) {
        self.start(SyntaxKind::ReferenceExpression);
        self.expect(SyntaxKind::Identifier);
        self.finish();
    }

    fn parse_import(&mut self) {
        self.start(SyntaxKind::ImportDirective);
        self.bump();
        self.parse_dotted_reference();
        if self.at(SyntaxKind::Dot) && self.peek2() == Some(SyntaxKind::Mul) {
            self.bump();
            self.bump();
        } else if self.at(SyntaxKind::AsKeyword) {
            self.start(SyntaxKind::ImportAlias);
            self.bump();
            self.expect(SyntaxKind::Identifier);
            self.finish();
        }
        self.finish();
    }

    // --- declarations ------------------------------------------------------

    /// Looks past modifiers and annotations for a declaration keyword.
    fn at_declaration(&self) -> bool {
        let mut n = 0;
        let mut saw_modifier = false;
        loop {
            let Some(i) = self.sig_index(n) else {
                return false;
            };
            match self.toks[i].kind {
                k if k.is_modifier_keyword() => {
                    saw_modifier = true;
                    n += 1;
                }
                SyntaxKind::CompanionKeyword => {
                    saw_modifier = true;
                    n += 1;
                }
                SyntaxKind::At => {
                    // `@Name` before a declaration; annotation arguments are
                    // not skipped here.
                    if self
                        .sig_index(n + 1)
                        .is_some_and(|j| self.toks[j].kind == SyntaxKind::Identifier)
                    {
                        saw_modifier = true;
                        n += 2;
                    } else {
                        return false;
                    }
                }
                SyntaxKind::ValKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::FunKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::TypealiasKeyword
                | SyntaxKind::ConstructorKeyword
                | SyntaxKind::InitKeyword => return true,
                SyntaxKind::ObjectKeyword => {
                    return saw_modifier
                        || self
                            .sig_index(n + 1)
                            .is_some_and(|j| self.toks[j].kind == SyntaxKind::Identifier);
                }
                _ => return false,
            }
        }
    }

    fn parse_declaration(&mut self) {
        let cp = self.cp();
        if self.at(SyntaxKind::At)
            || self.peek().is_some_and(|k| k.is_modifier_keyword())
            || self.at(SyntaxKind::CompanionKeyword)
        {
            self.parse_modifier_list();
        }
        match self.peek() {
            Some(SyntaxKind::ValKeyword | SyntaxKind::VarKeyword) => {
                if self.peek2() == Some(SyntaxKind::LPar) {
                    self.parse_destructuring(cp);
                } else {
                    self.parse_property(cp);
                }
            }
            Some(SyntaxKind::FunKeyword) => self.parse_fun(cp),
            Some(
                SyntaxKind::ClassKeyword | SyntaxKind::InterfaceKeyword | SyntaxKind::EnumKeyword,
            ) => self.parse_class(cp),
            Some(SyntaxKind::ObjectKeyword) => self.parse_object(cp),
            Some(SyntaxKind::TypealiasKeyword) => {
                self.b.start_node_at(cp, SyntaxKind::TypeAlias);
                self.bump();
                self.expect(SyntaxKind::Identifier);
                self.expect(SyntaxKind::Eq);
                self.parse_type_reference();
                self.finish();
            }
            Some(SyntaxKind::ConstructorKeyword) => {
                self.b.start_node_at(cp, SyntaxKind::SecondaryConstructor);
                self.bump();
                self.parse_value_parameter_list();
                if self.at(SyntaxKind::LBrace) {
                    self.parse_block();
                }
                self.finish();
            }
            Some(SyntaxKind::InitKeyword) => {
                self.b.start_node_at(cp, SyntaxKind::ClassInitializer);
                self.bump();
                self.parse_block();
                self.finish();
            }
            other => panic!("expected declaration, found {other:?}"),
        }
    }

    fn parse_modifier_list(&mut self) {
        self.start(SyntaxKind::ModifierList);
        loop {
            if self.peek().is_some_and(|k| k.is_modifier_keyword())
                || self.at(SyntaxKind::CompanionKeyword)
            {
                self.bump();
            } else if self.at(SyntaxKind::At) {
                self.parse_annotation_entry();
            } else {
                break;
            }
        }
        self.finish();
    }

    fn parse_annotation_entry(&mut self) {
        self.start(SyntaxKind::AnnotationEntry);
        self.expect(SyntaxKind::At);
        self.start(SyntaxKind::UserType);
        self.parse_ref();
        self.finish();
        // Arguments attach only when the `(` is glued to the name;
        // `@Fast (a)` annotates the parenthesized expression instead.
        if self.at(SyntaxKind::LPar) && self.sig_index(0) == Some(self.pos) {
            self.parse_value_argument_list();
        }
        self.finish();
    }

    fn parse_property(&mut self, cp: Checkpoint) {
        self.b.start_node_at(cp, SyntaxKind::Property);
        self.bump();
        self.expect(SyntaxKind::Identifier);
        if self.eat(SyntaxKind::Colon) {
            self.parse_type_reference();
        }
        if self.eat(SyntaxKind::Eq) {
            self.parse_expression();
        }
        while self.at(SyntaxKind::Identifier)
            && matches!(self.peek_text(), "get" | "set")
            && self.peek2() == Some(SyntaxKind::LPar)
        {
            self.parse_property_accessor();
        }
        self.finish();
    }

    fn parse_property_accessor(&mut self) {
        self.start(SyntaxKind::PropertyAccessor);
        self.bump();
        self.parse_value_parameter_list();
        if self.eat(SyntaxKind::Colon) {
            self.parse_type_reference();
        }
        if self.eat(SyntaxKind::Eq) {
            self.parse_expression();
        } else if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        }
        self.finish();
    }

    fn parse_destructuring(&mut self, cp: Checkpoint) {
        self.b.start_node_at(cp, SyntaxKind::DestructuringDeclaration);
        self.bump();
        self.parse_destructuring_entries();
        if self.eat(SyntaxKind::Eq) {
            self.parse_expression();
        }
        self.finish();
    }

    fn parse_destructuring_entries(&mut self) {
        self.expect(SyntaxKind::LPar);
        while !self.at(SyntaxKind::RPar) {
            self.start(SyntaxKind::DestructuringDeclarationEntry);
            self.expect(SyntaxKind::Identifier);
            if self.eat(SyntaxKind::Colon) {
                self.parse_type_reference();
            }
            self.finish();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RPar);
    }

    fn parse_fun(&mut self, cp: Checkpoint) {
        self.b.start_node_at(cp, SyntaxKind::Fun);
        self.bump();
        if self.at(SyntaxKind::Lt) {
            self.parse_type_parameter_list();
        }
        // Single-segment extension receiver: `fun T.f()`.
        if self.at(SyntaxKind::Identifier) && self.peek2() == Some(SyntaxKind::Dot) {
            self.start(SyntaxKind::TypeReference);
            self.start(SyntaxKind::UserType);
            self.parse_ref();
            self.finish();
            self.finish();
            self.expect(SyntaxKind::Dot);
        }
        self.expect(SyntaxKind::Identifier);
        self.parse_value_parameter_list();
        if self.eat(SyntaxKind::Colon) {
            self.parse_type_reference();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else if self.eat(SyntaxKind::Eq) {
            self.parse_expression();
        }
        self.finish();
    }

    fn parse_type_parameter_list(&mut self) {
        self.start(SyntaxKind::TypeParameterList);
        self.expect(SyntaxKind::Lt);
        while !self.at(SyntaxKind::Gt) {
            self.start(SyntaxKind::TypeParameter);
            self.expect(SyntaxKind::Identifier);
            if self.eat(SyntaxKind::Colon) {
                self.parse_type_reference();
            }
            self.finish();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Gt);
        self.finish();
    }

    fn parse_value_parameter_list(&mut self) {
        self.start(SyntaxKind::ValueParameterList);
        self.expect(SyntaxKind::LPar);
        while !self.at(SyntaxKind::RPar) {
            self.parse_value_parameter();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RPar);
        self.finish();
    }

    fn parse_value_parameter(&mut self) {
        self.start(SyntaxKind::ValueParameter);
        if self.at(SyntaxKind::ValKeyword) || self.at(SyntaxKind::VarKeyword) {
            self.bump();
        }
        self.expect(SyntaxKind::Identifier);
        if self.eat(SyntaxKind::Colon) {
            self.parse_type_reference();
        }
        if self.eat(SyntaxKind::Eq) {
            self.parse_expression();
        }
        self.finish();
    }

    fn parse_class(&mut self, cp: Checkpoint) {
        self.b.start_node_at(cp, SyntaxKind::Class);
        let is_enum = self.eat(SyntaxKind::EnumKeyword);
        self.bump(); // `class` or `interface`
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::Lt) {
            self.parse_type_parameter_list();
        }
        if self.at(SyntaxKind::LPar) {
            self.start(SyntaxKind::PrimaryConstructor);
            self.parse_value_parameter_list();
            self.finish();
        }
        if self.eat(SyntaxKind::Colon) {
            self.parse_super_type_list();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_class_body(is_enum);
        }
        self.finish();
    }

    fn parse_object(&mut self, cp: Checkpoint) {
        self.b.start_node_at(cp, SyntaxKind::ObjectDeclaration);
        self.parse_object_remainder();
        self.finish();
    }

    /// `object [Name] [: supertypes] [body]`, shared between declarations
    /// and object literals.
    fn parse_object_remainder(&mut self) {
        self.expect(SyntaxKind::ObjectKeyword);
        if self.at(SyntaxKind::Identifier) {
            self.bump();
        }
        if self.eat(SyntaxKind::Colon) {
            self.parse_super_type_list();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_class_body(false);
        }
    }

    fn parse_super_type_list(&mut self) {
        self.start(SyntaxKind::SuperTypeList);
        loop {
            let cp = self.cp();
            self.start(SyntaxKind::TypeReference);
            self.parse_user_type();
            self.finish();
            if self.at(SyntaxKind::LPar) {
                // The TypeReference just built becomes the callee, and the
                // callee plus arguments become the call entry.
                self.b.start_node_at(cp, SyntaxKind::ConstructorCallee);
                self.finish();
                self.b.start_node_at(cp, SyntaxKind::SuperTypeCallEntry);
                self.parse_value_argument_list();
                self.finish();
            } else {
                self.b.start_node_at(cp, SyntaxKind::SuperTypeEntry);
                self.finish();
            }
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish();
    }

    fn parse_class_body(&mut self, is_enum: bool) {
        self.start(SyntaxKind::ClassBody);
        self.expect(SyntaxKind::LBrace);
        while !self.at(SyntaxKind::RBrace) {
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            if is_enum && self.at(SyntaxKind::Identifier) {
                self.parse_enum_entry();
                self.eat(SyntaxKind::Comma);
            } else {
                self.parse_declaration();
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.finish();
    }

    fn parse_enum_entry(&mut self) {
        self.start(SyntaxKind::EnumEntry);
        self.expect(SyntaxKind::Identifier);
        if self.at(SyntaxKind::LPar) {
            self.parse_value_argument_list();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_class_body(false);
        }
        self.finish();
    }

    // --- types -------------------------------------------------------------

    fn parse_type_reference(&mut self) {
        self.start(SyntaxKind::TypeReference);
        let cp = self.cp();
        self.parse_type_element();
        while self.at(SyntaxKind::Quest) {
            self.b.start_node_at(cp, SyntaxKind::NullableType);
            self.bump();
            self.finish();
        }
        self.finish();
    }

    fn parse_type_element(&mut self) {
        if self.at(SyntaxKind::LPar) {
            self.start(SyntaxKind::FunctionType);
            self.start(SyntaxKind::ValueParameterList);
            self.expect(SyntaxKind::LPar);
            while !self.at(SyntaxKind::RPar) {
                self.start(SyntaxKind::ValueParameter);
                self.parse_type_reference();
                self.finish();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.expect(SyntaxKind::RPar);
            self.finish();
            self.expect(SyntaxKind::Arrow);
            self.parse_type_reference();
            self.finish();
        } else {
            self.parse_user_type();
        }
    }

    fn parse_user_type(&mut self) {
        let cp = self.cp();
        self.start(SyntaxKind::UserType);
        self.parse_ref();
        if self.at(SyntaxKind::Lt) {
            self.parse_type_argument_list();
        }
        self.finish();
        while self.at(SyntaxKind::Dot) && self.peek2() == Some(SyntaxKind::Identifier) {
            self.b.start_node_at(cp, SyntaxKind::UserType);
            self.bump();
            self.parse_ref();
            if self.at(SyntaxKind::Lt) {
                self.parse_type_argument_list();
            }
            self.finish();
        }
    }

    fn parse_type_argument_list(&mut self) {
        self.start(SyntaxKind::TypeArgumentList);
        self.expect(SyntaxKind::Lt);
        while !self.at(SyntaxKind::Gt) {
            self.start(SyntaxKind::TypeProjection);
            if self.at(SyntaxKind::Mul) {
                self.bump();
            } else {
                self.parse_type_reference();
            }
            self.finish();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Gt);
        self.finish();
    }

    // --- expressions -------------------------------------------------------

    fn parse_expression(&mut self) {
        self.parse_binary(0);
    }

    fn parse_binary(&mut self, min_strength: u8) {
        let cp = self.cp();
        self.parse_prefix();
        loop {
            let Some(op) = self.peek() else { break };
            // An identifier or keyword operator only reads as infix on the
            // same line; otherwise it starts the next statement (or the
            // next when-entry condition).
            if matches!(
                op,
                SyntaxKind::Identifier
                    | SyntaxKind::InKeyword
                    | SyntaxKind::NotIn
                    | SyntaxKind::IsKeyword
                    | SyntaxKind::NotIs
            ) && self.newline_before()
            {
                break;
            }
            let Some(strength) = binary_strength(op) else {
                break;
            };
            if strength < min_strength {
                break;
            }
            match op {
                SyntaxKind::IsKeyword | SyntaxKind::NotIs => {
                    self.b.start_node_at(cp, SyntaxKind::IsExpression);
                    self.start(SyntaxKind::OperationReference);
                    self.bump();
                    self.finish();
                    self.parse_type_reference();
                    self.finish();
                }
                SyntaxKind::AsKeyword | SyntaxKind::AsSafe => {
                    self.b.start_node_at(cp, SyntaxKind::BinaryWithType);
                    self.start(SyntaxKind::OperationReference);
                    self.bump();
                    self.finish();
                    self.parse_type_reference();
                    self.finish();
                }
                _ => {
                    self.b.start_node_at(cp, SyntaxKind::BinaryExpression);
                    self.start(SyntaxKind::OperationReference);
                    self.bump();
                    self.finish();
                    // Assignment is right-associative, the rest associate
                    // left.
                    let next_min = if strength == 0 { 0 } else { strength + 1 };
                    self.parse_binary(next_min);
                    self.finish();
                }
            }
        }
    }

    fn parse_prefix(&mut self) {
        match self.peek() {
            Some(
                SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Excl
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus,
            ) => {
                self.start(SyntaxKind::PrefixExpression);
                self.start(SyntaxKind::OperationReference);
                self.bump();
                self.finish();
                self.parse_prefix();
                self.finish();
            }
            Some(SyntaxKind::At) => {
                self.start(SyntaxKind::AnnotatedExpression);
                self.parse_annotation_entry();
                self.parse_prefix();
                self.finish();
            }
            Some(SyntaxKind::Identifier) if self.label_definition_ahead() => {
                self.start(SyntaxKind::LabeledExpression);
                self.start(SyntaxKind::Label);
                self.bump();
                self.expect(SyntaxKind::At);
                self.finish();
                self.parse_prefix();
                self.finish();
            }
            _ => self.parse_postfix(),
        }
    }

    /// `name@` glued together, as in `outer@ while (...)`.
    fn label_definition_ahead(&self) -> bool {
        let Some(i) = self.sig_index(0) else {
            return false;
        };
        self.toks.get(i + 1).is_some_and(|t| t.kind == SyntaxKind::At)
    }

    fn parse_postfix(&mut self) {
        let cp = self.cp();
        self.parse_atom();
        loop {
            match self.peek() {
                Some(SyntaxKind::PlusPlus | SyntaxKind::MinusMinus | SyntaxKind::ExclExcl)
                    if !self.newline_before() =>
                {
                    self.b.start_node_at(cp, SyntaxKind::PostfixExpression);
                    self.start(SyntaxKind::OperationReference);
                    self.bump();
                    self.finish();
                    self.finish();
                }
                Some(SyntaxKind::Dot) => {
                    self.b.start_node_at(cp, SyntaxKind::DotQualifiedExpression);
                    self.bump();
                    self.parse_selector();
                    self.finish();
                }
                Some(SyntaxKind::SafeAccess) => {
                    self.b.start_node_at(cp, SyntaxKind::SafeAccessExpression);
                    self.bump();
                    self.parse_selector();
                    self.finish();
                }
                Some(SyntaxKind::ColonColon) => {
                    if self.peek2() == Some(SyntaxKind::ClassKeyword) {
                        self.b.start_node_at(cp, SyntaxKind::ClassLiteralExpression);
                        self.bump();
                        self.bump();
                        self.finish();
                    } else {
                        self.b
                            .start_node_at(cp, SyntaxKind::CallableReferenceExpression);
                        self.bump();
                        self.parse_ref();
                        self.finish();
                    }
                }
                Some(SyntaxKind::LPar) if !self.newline_before() => {
                    self.b.start_node_at(cp, SyntaxKind::CallExpression);
                    self.parse_value_argument_list();
                    if self.at(SyntaxKind::LBrace) && !self.newline_before() {
                        self.parse_lambda();
                    }
                    self.finish();
                }
                Some(SyntaxKind::LBrace) if !self.newline_before() => {
                    self.b.start_node_at(cp, SyntaxKind::CallExpression);
                    self.parse_lambda();
                    self.finish();
                }
                Some(SyntaxKind::LBracket) if !self.newline_before() => {
                    self.b.start_node_at(cp, SyntaxKind::ArrayAccessExpression);
                    self.bump();
                    while !self.at(SyntaxKind::RBracket) {
                        self.parse_expression();
                        if !self.eat(SyntaxKind::Comma) {
                            break;
                        }
                    }
                    self.expect(SyntaxKind::RBracket);
                    self.finish();
                }
                _ => break,
            }
        }
    }

    /// The name or call after `.` / `?.`.
    fn parse_selector(&mut self) {
        let cp = self.cp();
        match self.peek() {
            Some(SyntaxKind::Identifier) => self.parse_ref(),
            other => panic!("expected selector, found {other:?}"),
        }
        if self.at(SyntaxKind::LPar) && !self.newline_before() {
            self.b.start_node_at(cp, SyntaxKind::CallExpression);
            self.parse_value_argument_list();
            if self.at(SyntaxKind::LBrace) && !self.newline_before() {
                self.parse_lambda();
            }
            self.finish();
        } else if self.at(SyntaxKind::LBrace) && !self.newline_before() {
            self.b.start_node_at(cp, SyntaxKind::CallExpression);
            self.parse_lambda();
            self.finish();
        }
    }

    fn parse_atom(&mut self) {
        match self.peek() {
            Some(SyntaxKind::LPar) => {
                self.start(SyntaxKind::ParenthesizedExpression);
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::RPar);
                self.finish();
            }
            Some(SyntaxKind::IntegerLiteral) => self.parse_constant(SyntaxKind::IntegerConstant),
            Some(SyntaxKind::FloatLiteral) => self.parse_constant(SyntaxKind::FloatConstant),
            Some(SyntaxKind::CharacterLiteral) => {
                self.parse_constant(SyntaxKind::CharacterConstant)
            }
            Some(SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword) => {
                self.parse_constant(SyntaxKind::BooleanConstant)
            }
            Some(SyntaxKind::NullKeyword) => self.parse_constant(SyntaxKind::NullConstant),
            Some(SyntaxKind::OpenQuote) => self.parse_string_template(),
            Some(SyntaxKind::Identifier) => self.parse_ref(),
            Some(SyntaxKind::ThisKeyword) => {
                self.start(SyntaxKind::ThisExpression);
                self.bump();
                self.parse_label_reference();
                self.finish();
            }
            Some(SyntaxKind::SuperKeyword) => {
                self.start(SyntaxKind::SuperExpression);
                self.bump();
                self.parse_label_reference();
                self.finish();
            }
            Some(SyntaxKind::IfKeyword) => self.parse_if(),
            Some(SyntaxKind::WhenKeyword) => self.parse_when(),
            Some(SyntaxKind::ForKeyword) => self.parse_for(),
            Some(SyntaxKind::WhileKeyword) => self.parse_while(),
            Some(SyntaxKind::DoKeyword) => self.parse_do_while(),
            Some(SyntaxKind::TryKeyword) => self.parse_try(),
            Some(SyntaxKind::ReturnKeyword) => {
                self.start(SyntaxKind::ReturnExpression);
                self.bump();
                self.parse_label_reference();
                if !self.newline_before() && self.peek().is_some_and(can_start_expression) {
                    self.parse_expression();
                }
                self.finish();
            }
            Some(SyntaxKind::ThrowKeyword) => {
                self.start(SyntaxKind::ThrowExpression);
                self.bump();
                self.parse_expression();
                self.finish();
            }
            Some(SyntaxKind::BreakKeyword) => {
                self.start(SyntaxKind::BreakExpression);
                self.bump();
                self.parse_label_reference();
                self.finish();
            }
            Some(SyntaxKind::ContinueKeyword) => {
                self.start(SyntaxKind::ContinueExpression);
                self.bump();
                self.parse_label_reference();
                self.finish();
            }
            Some(SyntaxKind::LBrace) => self.parse_lambda(),
            Some(SyntaxKind::LBracket) => {
                self.start(SyntaxKind::CollectionLiteralExpression);
                self.bump();
                while !self.at(SyntaxKind::RBracket) {
                    self.parse_expression();
                    if !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
                self.expect(SyntaxKind::RBracket);
                self.finish();
            }
            Some(SyntaxKind::ObjectKeyword) => {
                self.start(SyntaxKind::ObjectLiteralExpression);
                self.start(SyntaxKind::ObjectDeclaration);
                self.parse_object_remainder();
                self.finish();
                self.finish();
            }
            Some(SyntaxKind::ColonColon) => {
                self.start(SyntaxKind::CallableReferenceExpression);
                self.bump();
                self.parse_ref();
                self.finish();
            }
            other => panic!("expected expression, found {other:?} ({:?})", self.peek_text()),
        }
    }

    /// `@name` glued to the keyword before it, as in `return@f`.
    fn parse_label_reference(&mut self) {
        if self.at(SyntaxKind::At) && self.next_is_adjacent() {
            self.start(SyntaxKind::Label);
            self.bump();
            self.expect(SyntaxKind::Identifier);
            self.finish();
        }
    }

    fn parse_constant(&mut self, kind: SyntaxKind) {
        self.start(kind);
        self.bump();
        self.finish();
    }

    fn parse_string_template(&mut self) {
        self.start(SyntaxKind::StringTemplate);
        self.expect(SyntaxKind::OpenQuote);
        loop {
            match self.peek() {
                Some(SyntaxKind::ClosingQuote) => {
                    self.bump();
                    break;
                }
                Some(SyntaxKind::RegularStringPart) => {
                    self.start(SyntaxKind::LiteralStringTemplateEntry);
                    self.bump();
                    self.finish();
                }
                Some(SyntaxKind::EscapeSequence) => {
                    self.start(SyntaxKind::EscapeStringTemplateEntry);
                    self.bump();
                    self.finish();
                }
                Some(SyntaxKind::ShortTemplateEntryStart) => {
                    self.start(SyntaxKind::ShortStringTemplateEntry);
                    self.bump();
                    self.parse_ref();
                    self.finish();
                }
                Some(SyntaxKind::LongTemplateEntryStart) => {
                    self.start(SyntaxKind::LongStringTemplateEntry);
                    self.bump();
                    self.parse_expression();
                    self.expect(SyntaxKind::RBrace);
                    self.finish();
                }
                other => panic!("unexpected token in string template: {other:?}"),
            }
        }
        self.finish();
    }

    fn parse_block(&mut self) {
        self.start(SyntaxKind::Block);
        self.expect(SyntaxKind::LBrace);
        while !self.at(SyntaxKind::RBrace) {
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            if self.at_declaration() {
                self.parse_declaration();
            } else {
                self.parse_expression();
            }
        }
        self.expect(SyntaxKind::RBrace);
        self.finish();
    }

    /// A block when braced, a single expression otherwise.
    fn parse_control_body(&mut self) {
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.parse_expression();
        }
    }

    fn parse_lambda(&mut self) {
        self.start(SyntaxKind::LambdaExpression);
        self.start(SyntaxKind::FunctionLiteral);
        self.expect(SyntaxKind::LBrace);
        if self.lambda_parameters_ahead() {
            self.start(SyntaxKind::ValueParameterList);
            loop {
                self.start(SyntaxKind::ValueParameter);
                self.expect(SyntaxKind::Identifier);
                if self.eat(SyntaxKind::Colon) {
                    self.parse_type_reference();
                }
                self.finish();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.finish();
            self.expect(SyntaxKind::Arrow);
        }
        self.start(SyntaxKind::Block);
        while !self.at(SyntaxKind::RBrace) {
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            if self.at_declaration() {
                self.parse_declaration();
            } else {
                self.parse_expression();
            }
        }
        self.finish();
        self.expect(SyntaxKind::RBrace);
        self.finish();
        self.finish();
    }

    /// Whether the tokens ahead read as `a, b ->` rather than a statement.
    fn lambda_parameters_ahead(&self) -> bool {
        for n in 0..16 {
            let Some(i) = self.sig_index(n) else {
                return false;
            };
            match self.toks[i].kind {
                SyntaxKind::Arrow => return n > 0,
                SyntaxKind::Identifier
                | SyntaxKind::Comma
                | SyntaxKind::Colon
                | SyntaxKind::Quest
                | SyntaxKind::Dot
                | SyntaxKind::Lt
                | SyntaxKind::Gt => {}
                _ => return false,
            }
        }
        false
    }

    fn parse_if(&mut self) {
        self.start(SyntaxKind::IfExpression);
        self.bump();
        self.expect(SyntaxKind::LPar);
        self.parse_expression();
        self.expect(SyntaxKind::RPar);
        self.parse_control_body();
        if self.at(SyntaxKind::ElseKeyword) {
            self.bump();
            self.parse_control_body();
        }
        self.finish();
    }

    fn parse_when(&mut self) {
        self.start(SyntaxKind::WhenExpression);
        self.bump();
        if self.eat(SyntaxKind::LPar) {
            self.parse_expression();
            self.expect(SyntaxKind::RPar);
        }
        self.expect(SyntaxKind::LBrace);
        while !self.at(SyntaxKind::RBrace) {
            self.parse_when_entry();
        }
        self.expect(SyntaxKind::RBrace);
        self.finish();
    }

    fn parse_when_entry(&mut self) {
        self.start(SyntaxKind::WhenEntry);
        if !self.eat(SyntaxKind::ElseKeyword) {
            loop {
                self.parse_when_condition();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::Arrow);
        self.parse_control_body();
        self.finish();
    }

    fn parse_when_condition(&mut self) {
        match self.peek() {
            Some(SyntaxKind::InKeyword | SyntaxKind::NotIn) => {
                self.start(SyntaxKind::WhenConditionInRange);
                self.start(SyntaxKind::OperationReference);
                self.bump();
                self.finish();
                self.parse_expression();
                self.finish();
            }
            Some(SyntaxKind::IsKeyword | SyntaxKind::NotIs) => {
                self.start(SyntaxKind::WhenConditionIsPattern);
                self.bump();
                self.parse_type_reference();
                self.finish();
            }
            _ => {
                self.start(SyntaxKind::WhenConditionWithExpression);
                self.parse_expression();
                self.finish();
            }
        }
    }

    fn parse_for(&mut self) {
        self.start(SyntaxKind::ForExpression);
        self.bump();
        self.expect(SyntaxKind::LPar);
        if self.at(SyntaxKind::LPar) {
            self.start(SyntaxKind::DestructuringDeclaration);
            self.parse_destructuring_entries();
            self.finish();
        } else {
            self.start(SyntaxKind::ValueParameter);
            self.expect(SyntaxKind::Identifier);
            if self.eat(SyntaxKind::Colon) {
                self.parse_type_reference();
            }
            self.finish();
        }
        self.expect(SyntaxKind::InKeyword);
        self.parse_expression();
        self.expect(SyntaxKind::RPar);
        self.parse_control_body();
        self.finish();
    }

    fn parse_while(&mut self) {
        self.start(SyntaxKind::WhileExpression);
        self.bump();
        self.expect(SyntaxKind::LPar);
        self.parse_expression();
        self.expect(SyntaxKind::RPar);
        self.parse_control_body();
        self.finish();
    }

    fn parse_do_while(&mut self) {
        self.start(SyntaxKind::DoWhileExpression);
        self.bump();
        self.parse_control_body();
        self.expect(SyntaxKind::WhileKeyword);
        self.expect(SyntaxKind::LPar);
        self.parse_expression();
        self.expect(SyntaxKind::RPar);
        self.finish();
    }

    fn parse_try(&mut self) {
        self.start(SyntaxKind::TryExpression);
        self.bump();
        self.parse_block();
        while self.at(SyntaxKind::CatchKeyword) {
            self.start(SyntaxKind::CatchClause);
            self.bump();
            self.expect(SyntaxKind::LPar);
            self.parse_value_parameter();
            self.expect(SyntaxKind::RPar);
            self.parse_block();
            self.finish();
        }
        if self.at(SyntaxKind::FinallyKeyword) {
            self.start(SyntaxKind::FinallySection);
            self.bump();
            self.parse_block();
            self.finish();
        }
        self.finish();
    }

    fn parse_value_argument_list(&mut self) {
        self.start(SyntaxKind::ValueArgumentList);
        self.expect(SyntaxKind::LPar);
        while !self.at(SyntaxKind::RPar) {
            self.start(SyntaxKind::ValueArgument);
            if self.at(SyntaxKind::Identifier) && self.peek2() == Some(SyntaxKind::Eq) {
                self.parse_ref();
                self.bump();
            }
            self.parse_expression();
            self.finish();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RPar);
        self.finish();
    }
}
