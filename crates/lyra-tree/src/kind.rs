//! The closed enumeration of Lyra syntax kinds.
//!
//! Token kinds come first, composite node kinds after them. The discriminant
//! is a `u16`, matching the width the tree stores per node.

use serde::{Deserialize, Serialize};

macro_rules! define_kinds {
    ($($kind:ident,)+) => {
        /// Kind tag carried by every node in a [`crate::SyntaxTree`].
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum SyntaxKind {
            $($kind,)+
        }

        impl SyntaxKind {
            /// Every kind, in discriminant order.
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind,)+];
        }
    };
}

define_kinds! {
    // Trivia and error recovery
    Error,
    Whitespace,
    EolComment,
    BlockComment,
    DocComment,

    // Literal and identifier tokens
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    CharacterLiteral,
    OpenQuote,
    ClosingQuote,
    RegularStringPart,
    EscapeSequence,
    ShortTemplateEntryStart,
    LongTemplateEntryStart,

    // Keywords
    PackageKeyword,
    ImportKeyword,
    ClassKeyword,
    InterfaceKeyword,
    ObjectKeyword,
    EnumKeyword,
    FunKeyword,
    ValKeyword,
    VarKeyword,
    TypealiasKeyword,
    ConstructorKeyword,
    InitKeyword,
    CompanionKeyword,
    ThisKeyword,
    SuperKeyword,
    IfKeyword,
    ElseKeyword,
    WhenKeyword,
    ForKeyword,
    WhileKeyword,
    DoKeyword,
    TryKeyword,
    CatchKeyword,
    FinallyKeyword,
    ReturnKeyword,
    ThrowKeyword,
    BreakKeyword,
    ContinueKeyword,
    IsKeyword,
    InKeyword,
    AsKeyword,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // Modifier keywords
    PublicKeyword,
    PrivateKeyword,
    InternalKeyword,
    ProtectedKeyword,
    AbstractKeyword,
    FinalKeyword,
    OpenKeyword,
    OverrideKeyword,
    InlineKeyword,
    ConstKeyword,

    // Punctuation and operators
    LPar,
    RPar,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    Dot,
    SafeAccess,
    Quest,
    Arrow,
    At,
    Eq,
    PlusEq,
    MinusEq,
    MultEq,
    DivEq,
    PercEq,
    EqEq,
    ExclEq,
    EqEqEq,
    ExclEqEqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Mul,
    Div,
    Perc,
    PlusPlus,
    MinusMinus,
    Excl,
    ExclExcl,
    AndAnd,
    OrOr,
    Elvis,
    Range,
    NotIn,
    NotIs,
    AsSafe,

    // File structure nodes
    SourceFile,
    PackageDirective,
    ImportList,
    ImportDirective,
    ImportAlias,

    // Declaration nodes
    Class,
    ObjectDeclaration,
    ClassBody,
    ClassInitializer,
    PrimaryConstructor,
    SecondaryConstructor,
    ConstructorCallee,
    EnumEntry,
    Fun,
    Property,
    PropertyAccessor,
    TypeAlias,
    DestructuringDeclaration,
    DestructuringDeclarationEntry,

    // Declaration parts
    ModifierList,
    AnnotationEntry,
    ValueParameterList,
    ValueParameter,
    TypeParameterList,
    TypeParameter,
    TypeConstraintList,
    TypeConstraint,
    SuperTypeList,
    SuperTypeEntry,
    SuperTypeCallEntry,
    ValueArgumentList,
    ValueArgument,
    TypeArgumentList,
    TypeProjection,

    // Type element nodes
    TypeReference,
    UserType,
    FunctionType,
    NullableType,

    // Expression nodes
    Block,
    IfExpression,
    WhenExpression,
    WhenEntry,
    WhenConditionWithExpression,
    WhenConditionInRange,
    WhenConditionIsPattern,
    ForExpression,
    WhileExpression,
    DoWhileExpression,
    TryExpression,
    CatchClause,
    FinallySection,
    BinaryExpression,
    BinaryWithType,
    IsExpression,
    PrefixExpression,
    PostfixExpression,
    OperationReference,
    ParenthesizedExpression,
    LabeledExpression,
    Label,
    AnnotatedExpression,
    ReferenceExpression,
    CallExpression,
    ArrayAccessExpression,
    DotQualifiedExpression,
    SafeAccessExpression,
    CallableReferenceExpression,
    ClassLiteralExpression,
    ObjectLiteralExpression,
    CollectionLiteralExpression,
    LambdaExpression,
    FunctionLiteral,
    ThisExpression,
    SuperExpression,
    ReturnExpression,
    ThrowExpression,
    BreakExpression,
    ContinueExpression,
    IntegerConstant,
    FloatConstant,
    BooleanConstant,
    CharacterConstant,
    NullConstant,
    StringTemplate,
    LiteralStringTemplateEntry,
    EscapeStringTemplateEntry,
    ShortStringTemplateEntry,
    LongStringTemplateEntry,
}

impl SyntaxKind {
    /// Number of kinds in the enumeration.
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn to_raw(self) -> u16 {
        self as u16
    }

    /// Recover a kind from its raw discriminant, e.g. when reading a
    /// serialized stub produced by an older index format.
    #[inline]
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Whitespace and comments: present in the tree, invisible to the facade.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::EolComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
        )
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        let raw = self.to_raw();
        raw >= SyntaxKind::PackageKeyword.to_raw() && raw <= SyntaxKind::ConstKeyword.to_raw()
    }

    #[inline]
    pub fn is_modifier_keyword(self) -> bool {
        let raw = self.to_raw();
        raw >= SyntaxKind::PublicKeyword.to_raw() && raw <= SyntaxKind::ConstKeyword.to_raw()
    }

    /// Token kinds are leaves; everything at or after `SourceFile` is a
    /// composite node produced by the parser.
    #[inline]
    pub fn is_token(self) -> bool {
        self.to_raw() < SyntaxKind::SourceFile.to_raw() && self != SyntaxKind::Error
    }
}
