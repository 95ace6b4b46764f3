//! Abstract Syntax Tree node definitions
//!
//! Nodes serialize to ESTree-like JSON: enums carry a `"type"` tag naming the
//! node, and every node carries a `location`. Shared payload structs
//! ([`Identifier`], [`Function`], [`Class`], ...) take their tag from the enum
//! variant that wraps them.

use core_types::SourceLocation;
use serde::Serialize;

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    /// Top-level statements
    pub body: Vec<Statement>,
    /// Source location
    pub location: SourceLocation,
}

/// Identifier reference or binding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    /// Identifier name with escapes resolved
    pub name: String,
    /// Source location
    pub location: SourceLocation,
}

/// Literal value node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    /// Literal value
    pub value: LiteralValue,
    /// Exact source text
    pub raw: String,
    /// Source location
    pub location: SourceLocation,
}

/// Value of a literal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// null
    Null,
    /// Boolean
    Boolean(bool),
    /// Number
    Number(f64),
    /// String (escapes decoded)
    String(String),
    /// BigInt (normalised to decimal digits)
    BigInt(String),
    /// Regular expression
    RegExp {
        /// Pattern body between the slashes
        pattern: String,
        /// Flags after the closing slash
        flags: String,
    },
}

/// JavaScript statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// Variable declaration (let, const, var)
    VariableDeclaration(VariableDeclaration),

    /// Function declaration
    FunctionDeclaration(Function),

    /// Class declaration
    ClassDeclaration(Class),

    /// Expression statement
    ExpressionStatement {
        /// The expression
        expression: Expression,
        /// Source location
        location: SourceLocation,
    },

    /// Return statement
    ReturnStatement {
        /// Return value
        argument: Option<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// If statement
    IfStatement {
        /// Condition
        test: Expression,
        /// Consequent block
        consequent: Box<Statement>,
        /// Alternate block
        alternate: Option<Box<Statement>>,
        /// Source location
        location: SourceLocation,
    },

    /// While loop
    WhileStatement {
        /// Loop condition
        test: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// Do-while loop
    DoWhileStatement {
        /// Loop body
        body: Box<Statement>,
        /// Loop condition
        test: Expression,
        /// Source location
        location: SourceLocation,
    },

    /// For loop
    ForStatement {
        /// Initialization
        init: Option<ForInit>,
        /// Condition
        test: Option<Expression>,
        /// Update expression
        update: Option<Expression>,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// For...in loop
    ForInStatement {
        /// Left side (declaration or pattern)
        left: ForHead,
        /// Object to iterate over
        right: Expression,
        /// Loop body
        body: Box<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// For...of loop
    ForOfStatement {
        /// Left side (declaration or pattern)
        left: ForHead,
        /// Iterable to iterate over
        right: Expression,
        /// Loop body
        body: Box<Statement>,
        /// `for await`
        is_await: bool,
        /// Source location
        location: SourceLocation,
    },

    /// Block statement
    BlockStatement {
        /// Block body
        body: Vec<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// Empty statement
    EmptyStatement {
        /// Source location
        location: SourceLocation,
    },

    /// Break statement
    BreakStatement {
        /// Optional label
        label: Option<Identifier>,
        /// Source location
        location: SourceLocation,
    },

    /// Continue statement
    ContinueStatement {
        /// Optional label
        label: Option<Identifier>,
        /// Source location
        location: SourceLocation,
    },

    /// Throw statement
    ThrowStatement {
        /// Exception to throw
        argument: Expression,
        /// Source location
        location: SourceLocation,
    },

    /// Try statement
    TryStatement {
        /// Try block
        block: Vec<Statement>,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally block
        finalizer: Option<Vec<Statement>>,
        /// Source location
        location: SourceLocation,
    },

    /// Switch statement
    SwitchStatement {
        /// Discriminant expression
        discriminant: Expression,
        /// Case clauses
        cases: Vec<SwitchCase>,
        /// Source location
        location: SourceLocation,
    },

    /// With statement
    WithStatement {
        /// Object expression
        object: Expression,
        /// Body statement
        body: Box<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// Debugger statement
    DebuggerStatement {
        /// Source location
        location: SourceLocation,
    },

    /// Labeled statement
    LabeledStatement {
        /// Label name
        label: Identifier,
        /// Body statement
        body: Box<Statement>,
        /// Source location
        location: SourceLocation,
    },

    /// `import ... from "source"` or `import "source"`
    ImportDeclaration {
        /// Imported bindings
        specifiers: Vec<ImportSpecifier>,
        /// Module specifier string
        source: Literal,
        /// Source location
        location: SourceLocation,
    },

    /// `export { a, b as c }`, `export { a } from "m"` or `export <declaration>`
    ExportNamedDeclaration {
        /// Exported declaration
        declaration: Option<Box<Statement>>,
        /// Export list
        specifiers: Vec<ExportSpecifier>,
        /// Re-export source
        source: Option<Literal>,
        /// Source location
        location: SourceLocation,
    },

    /// `export default ...`
    ExportDefaultDeclaration {
        /// Exported declaration or expression
        declaration: ExportDefaultKind,
        /// Source location
        location: SourceLocation,
    },

    /// `export * from "m"` or `export * as ns from "m"`
    ExportAllDeclaration {
        /// Namespace name
        exported: Option<Identifier>,
        /// Re-export source
        source: Literal,
        /// Source location
        location: SourceLocation,
    },
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// let declaration
    Let,
    /// const declaration
    Const,
    /// var declaration
    Var,
}

/// `var`/`let`/`const` declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    /// Declaration kind
    pub kind: VariableKind,
    /// List of declarators
    pub declarations: Vec<VariableDeclarator>,
    /// Source location
    pub location: SourceLocation,
}

/// Variable declarator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    /// Pattern (identifier or destructuring)
    pub id: Pattern,
    /// Initial value
    pub init: Option<Expression>,
    /// Source location
    pub location: SourceLocation,
}

/// For loop initialization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ForInit {
    /// Variable declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression {
        /// Init expression
        expression: Expression,
    },
}

/// Left side of for-in/for-of loop
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ForHead {
    /// Variable declaration (let x, const x, var x)
    VariableDeclaration(VariableDeclaration),
    /// Existing binding, member or destructuring target
    Pattern {
        /// Assignment target
        pattern: Pattern,
    },
}

/// Catch clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause {
    /// Parameter (optional catch binding when absent)
    pub param: Option<Pattern>,
    /// Body
    pub body: Vec<Statement>,
    /// Source location
    pub location: SourceLocation,
}

/// Switch case clause
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
    /// Test expression (None for default case)
    pub test: Option<Expression>,
    /// Consequent statements
    pub consequent: Vec<Statement>,
    /// Source location
    pub location: SourceLocation,
}

/// Import binding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ImportSpecifier {
    /// `{ imported as local }`
    ImportSpecifier {
        /// Exported name in the source module
        imported: Identifier,
        /// Local binding
        local: Identifier,
        /// Source location
        location: SourceLocation,
    },
    /// `import local from ...`
    ImportDefaultSpecifier {
        /// Local binding
        local: Identifier,
        /// Source location
        location: SourceLocation,
    },
    /// `import * as local from ...`
    ImportNamespaceSpecifier {
        /// Local binding
        local: Identifier,
        /// Source location
        location: SourceLocation,
    },
}

/// `local as exported` inside an export list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier {
    /// Local name
    pub local: Identifier,
    /// Exported name
    pub exported: Identifier,
    /// Source location
    pub location: SourceLocation,
}

/// Payload of `export default`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExportDefaultKind {
    /// Function declaration (name optional)
    FunctionDeclaration(Function),
    /// Class declaration (name optional)
    ClassDeclaration(Class),
    /// Any other assignment expression
    Expression {
        /// Exported expression
        expression: Expression,
    },
}

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),

    /// Literal value
    Literal(Literal),

    /// Private name on the left of `in` or as a member property
    PrivateName(Identifier),

    /// Parenthesized expression; kept so that `({a}) = b` and `(a ?? b) || c`
    /// can be told apart from their unparenthesized forms
    ParenthesizedExpression {
        /// The inner expression
        expression: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Template literal
    TemplateLiteral(TemplateLiteral),

    /// Tagged template
    TaggedTemplateExpression {
        /// Tag function
        tag: Box<Expression>,
        /// Template
        quasi: TemplateLiteral,
        /// Source location
        location: SourceLocation,
    },

    /// This expression
    ThisExpression {
        /// Source location
        location: SourceLocation,
    },

    /// Super expression
    Super {
        /// Source location
        location: SourceLocation,
    },

    /// Array literal
    ArrayExpression {
        /// Elements (None for holes)
        elements: Vec<Option<ExpressionOrSpread>>,
        /// Source location
        location: SourceLocation,
    },

    /// Object literal
    ObjectExpression {
        /// Properties
        properties: Vec<ObjectMember>,
        /// Source location
        location: SourceLocation,
    },

    /// Function expression
    FunctionExpression(Function),

    /// Arrow function
    ArrowFunctionExpression(ArrowFunction),

    /// Class expression
    ClassExpression(Class),

    /// Unary operation
    UnaryExpression {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        argument: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Update expression (++, --)
    UpdateExpression {
        /// Operator
        operator: UpdateOperator,
        /// Is prefix operator
        prefix: bool,
        /// Operand
        argument: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Binary operation
    BinaryExpression {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Logical expression (&&, ||, ??)
    LogicalExpression {
        /// Operator
        operator: LogicalOperator,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Assignment expression
    AssignmentExpression {
        /// Operator
        operator: AssignmentOperator,
        /// Left-hand side
        left: Box<Pattern>,
        /// Right-hand side
        right: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Conditional expression (ternary)
    ConditionalExpression {
        /// Condition
        test: Box<Expression>,
        /// Consequent
        consequent: Box<Expression>,
        /// Alternate
        alternate: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Function call
    CallExpression {
        /// Function being called
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<ExpressionOrSpread>,
        /// Optional call (e.g., foo?.())
        optional: bool,
        /// Source location
        location: SourceLocation,
    },

    /// Member access (obj.prop or obj[prop])
    MemberExpression {
        /// Object
        object: Box<Expression>,
        /// Property
        property: Box<Expression>,
        /// Is computed (bracket notation)
        computed: bool,
        /// Optional access (e.g., obj?.prop)
        optional: bool,
        /// Source location
        location: SourceLocation,
    },

    /// New expression
    NewExpression {
        /// Constructor
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<ExpressionOrSpread>,
        /// Source location
        location: SourceLocation,
    },

    /// Meta property (new.target, import.meta)
    MetaProperty {
        /// Meta (e.g., "new" or "import")
        meta: Identifier,
        /// Property (e.g., "target" or "meta")
        property: Identifier,
        /// Source location
        location: SourceLocation,
    },

    /// Dynamic `import(source)`
    ImportExpression {
        /// Module specifier expression
        source: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Sequence expression (comma-separated)
    SequenceExpression {
        /// Expressions
        expressions: Vec<Expression>,
        /// Source location
        location: SourceLocation,
    },

    /// Yield expression
    YieldExpression {
        /// Argument
        argument: Option<Box<Expression>>,
        /// Is delegated (yield*)
        delegate: bool,
        /// Source location
        location: SourceLocation,
    },

    /// Await expression
    AwaitExpression {
        /// Argument
        argument: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },
}

/// Spread element (`...expr`) in array literals and argument lists
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SpreadElement {
    /// Spread argument
    pub argument: Expression,
    /// Source location
    pub location: SourceLocation,
}

/// Array element or call argument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpressionOrSpread {
    /// Normal element
    Expression(Expression),
    /// Spread element
    Spread(SpreadElement),
}

/// Object literal member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ObjectMember {
    /// Property, method or accessor
    Property {
        /// Key
        key: PropertyKey,
        /// Value (function for methods and accessors)
        value: Expression,
        /// Plain value, getter or setter
        kind: PropertyKind,
        /// Method shorthand (`m() {}`)
        method: bool,
        /// Shorthand (`{ a }` or `{ a = 1 }`)
        shorthand: bool,
        /// Computed key
        computed: bool,
        /// Source location
        location: SourceLocation,
    },
    /// Spread property
    SpreadElement {
        /// Spread argument
        argument: Expression,
        /// Source location
        location: SourceLocation,
    },
}

/// Object property kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Plain value or method
    Init,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Property key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    /// Identifier key (keywords allowed)
    Identifier(Identifier),
    /// String, number or BigInt key
    Literal(Literal),
    /// Private name (`#x`), class members only
    PrivateName(Identifier),
    /// Computed key (`[expr]`)
    Computed {
        /// Key expression
        expression: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },
}

impl PropertyKey {
    /// Static name of the key, if it has one
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(id) => Some(&id.name),
            PropertyKey::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }

    /// Source location
    pub fn location(&self) -> SourceLocation {
        match self {
            PropertyKey::Identifier(id) | PropertyKey::PrivateName(id) => id.location,
            PropertyKey::Literal(lit) => lit.location,
            PropertyKey::Computed { location, .. } => *location,
        }
    }
}

/// Binding or assignment target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Simple identifier
    Identifier(Identifier),
    /// Object destructuring
    ObjectPattern {
        /// Properties, with an optional trailing rest element
        properties: Vec<ObjectPatternProperty>,
        /// Source location
        location: SourceLocation,
    },
    /// Array destructuring
    ArrayPattern {
        /// Elements (None for elisions)
        elements: Vec<Option<Pattern>>,
        /// Source location
        location: SourceLocation,
    },
    /// Assignment pattern (with default value)
    AssignmentPattern {
        /// Left side
        left: Box<Pattern>,
        /// Default value
        right: Box<Expression>,
        /// Source location
        location: SourceLocation,
    },
    /// Rest element (...rest)
    RestElement {
        /// Rest target
        argument: Box<Pattern>,
        /// Source location
        location: SourceLocation,
    },
    /// Member expression target (destructuring assignment only, not bindings)
    /// Example: [obj.prop] = [1] or [arr[0]] = [1]
    MemberExpression {
        /// The member expression
        expression: Box<Expression>,
    },
}

/// Object pattern member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ObjectPatternProperty {
    /// `key: value`, `key` or `key = default`
    Property {
        /// Key
        key: PropertyKey,
        /// Value pattern
        value: Pattern,
        /// Is shorthand (e.g., { a } instead of { a: a })
        shorthand: bool,
        /// Computed key
        computed: bool,
        /// Source location
        location: SourceLocation,
    },
    /// `...rest`
    RestElement {
        /// Rest target
        argument: Box<Pattern>,
        /// Source location
        location: SourceLocation,
    },
}

/// Function declaration, expression or method body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Function name
    pub id: Option<Identifier>,
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body
    pub body: Vec<Statement>,
    /// Is async function
    pub is_async: bool,
    /// Is generator function
    pub is_generator: bool,
    /// Source location
    pub location: SourceLocation,
}

/// Arrow function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunction {
    /// Parameters
    pub params: Vec<Pattern>,
    /// Body (expression or block)
    pub body: ArrowFunctionBody,
    /// Is async
    pub is_async: bool,
    /// Source location
    pub location: SourceLocation,
}

/// Arrow function body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowFunctionBody {
    /// Expression body
    Expression(Box<Expression>),
    /// Block body
    Block(Vec<Statement>),
}

/// Class declaration or expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    /// Class name
    pub id: Option<Identifier>,
    /// Superclass expression
    pub super_class: Option<Box<Expression>>,
    /// Class body
    pub body: Vec<ClassMember>,
    /// Source location
    pub location: SourceLocation,
}

/// Class element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClassMember {
    /// Method, accessor or constructor
    MethodDefinition {
        /// Method name
        key: PropertyKey,
        /// Method kind
        kind: MethodKind,
        /// Function value
        value: Function,
        /// Is static
        is_static: bool,
        /// Is computed (e.g., [expr])
        computed: bool,
        /// Source location
        location: SourceLocation,
    },
    /// Field
    PropertyDefinition {
        /// Property key
        key: PropertyKey,
        /// Initial value
        value: Option<Expression>,
        /// Is static
        is_static: bool,
        /// Is computed (e.g., [expr])
        computed: bool,
        /// Source location
        location: SourceLocation,
    },
    /// `static { ... }`
    StaticBlock {
        /// Block body
        body: Vec<Statement>,
        /// Source location
        location: SourceLocation,
    },
}

/// Method kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// Constructor
    Constructor,
    /// Regular method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Template literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral {
    /// Quasis (string parts)
    pub quasis: Vec<TemplateElement>,
    /// Expressions (interpolated parts)
    pub expressions: Vec<Expression>,
    /// Source location
    pub location: SourceLocation,
}

/// Template literal element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct TemplateElement {
    /// Raw string value
    pub raw: String,
    /// Cooked string value
    pub cooked: String,
    /// Is tail element
    pub tail: bool,
    /// Source location
    pub location: SourceLocation,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// Addition
    #[serde(rename = "+")]
    Add,
    /// Subtraction
    #[serde(rename = "-")]
    Sub,
    /// Multiplication
    #[serde(rename = "*")]
    Mul,
    /// Division
    #[serde(rename = "/")]
    Div,
    /// Modulo
    #[serde(rename = "%")]
    Mod,
    /// Exponentiation
    #[serde(rename = "**")]
    Exp,
    /// Equality
    #[serde(rename = "==")]
    Eq,
    /// Inequality
    #[serde(rename = "!=")]
    NotEq,
    /// Strict equality
    #[serde(rename = "===")]
    StrictEq,
    /// Strict inequality
    #[serde(rename = "!==")]
    StrictNotEq,
    /// Less than
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal
    #[serde(rename = "<=")]
    LtEq,
    /// Greater than
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal
    #[serde(rename = ">=")]
    GtEq,
    /// Bitwise AND
    #[serde(rename = "&")]
    BitwiseAnd,
    /// Bitwise OR
    #[serde(rename = "|")]
    BitwiseOr,
    /// Bitwise XOR
    #[serde(rename = "^")]
    BitwiseXor,
    /// Left shift
    #[serde(rename = "<<")]
    LeftShift,
    /// Right shift
    #[serde(rename = ">>")]
    RightShift,
    /// Unsigned right shift
    #[serde(rename = ">>>")]
    UnsignedRightShift,
    /// Instanceof
    #[serde(rename = "instanceof")]
    Instanceof,
    /// In
    #[serde(rename = "in")]
    In,
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    /// Logical AND
    #[serde(rename = "&&")]
    And,
    /// Logical OR
    #[serde(rename = "||")]
    Or,
    /// Nullish coalescing
    #[serde(rename = "??")]
    NullishCoalesce,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// Negate
    #[serde(rename = "-")]
    Minus,
    /// Plus (type coercion)
    #[serde(rename = "+")]
    Plus,
    /// Logical NOT
    #[serde(rename = "!")]
    Not,
    /// Bitwise NOT
    #[serde(rename = "~")]
    BitwiseNot,
    /// Typeof
    #[serde(rename = "typeof")]
    Typeof,
    /// Void
    #[serde(rename = "void")]
    Void,
    /// Delete
    #[serde(rename = "delete")]
    Delete,
}

/// Update operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    /// Increment
    #[serde(rename = "++")]
    Increment,
    /// Decrement
    #[serde(rename = "--")]
    Decrement,
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    /// Simple assignment (=)
    #[serde(rename = "=")]
    Assign,
    /// Addition assignment (+=)
    #[serde(rename = "+=")]
    AddAssign,
    /// Subtraction assignment (-=)
    #[serde(rename = "-=")]
    SubAssign,
    /// Multiplication assignment (*=)
    #[serde(rename = "*=")]
    MulAssign,
    /// Division assignment (/=)
    #[serde(rename = "/=")]
    DivAssign,
    /// Modulo assignment (%=)
    #[serde(rename = "%=")]
    ModAssign,
    /// Exponentiation assignment (**=)
    #[serde(rename = "**=")]
    ExpAssign,
    /// Bitwise AND assignment (&=)
    #[serde(rename = "&=")]
    BitAndAssign,
    /// Bitwise OR assignment (|=)
    #[serde(rename = "|=")]
    BitOrAssign,
    /// Bitwise XOR assignment (^=)
    #[serde(rename = "^=")]
    BitXorAssign,
    /// Left shift assignment (<<=)
    #[serde(rename = "<<=")]
    LeftShiftAssign,
    /// Right shift assignment (>>=)
    #[serde(rename = ">>=")]
    RightShiftAssign,
    /// Unsigned right shift assignment (>>>=)
    #[serde(rename = ">>>=")]
    UnsignedRightShiftAssign,
    /// Logical AND assignment (&&=)
    #[serde(rename = "&&=")]
    LogicalAndAssign,
    /// Logical OR assignment (||=)
    #[serde(rename = "||=")]
    LogicalOrAssign,
    /// Nullish coalescing assignment (??=)
    #[serde(rename = "??=")]
    NullishCoalesceAssign,
}

impl Statement {
    /// Source location of the statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::VariableDeclaration(decl) => decl.location,
            Statement::FunctionDeclaration(func) => func.location,
            Statement::ClassDeclaration(class) => class.location,
            Statement::ExpressionStatement { location, .. }
            | Statement::ReturnStatement { location, .. }
            | Statement::IfStatement { location, .. }
            | Statement::WhileStatement { location, .. }
            | Statement::DoWhileStatement { location, .. }
            | Statement::ForStatement { location, .. }
            | Statement::ForInStatement { location, .. }
            | Statement::ForOfStatement { location, .. }
            | Statement::BlockStatement { location, .. }
            | Statement::EmptyStatement { location }
            | Statement::BreakStatement { location, .. }
            | Statement::ContinueStatement { location, .. }
            | Statement::ThrowStatement { location, .. }
            | Statement::TryStatement { location, .. }
            | Statement::SwitchStatement { location, .. }
            | Statement::WithStatement { location, .. }
            | Statement::DebuggerStatement { location }
            | Statement::LabeledStatement { location, .. }
            | Statement::ImportDeclaration { location, .. }
            | Statement::ExportNamedDeclaration { location, .. }
            | Statement::ExportDefaultDeclaration { location, .. }
            | Statement::ExportAllDeclaration { location, .. } => *location,
        }
    }
}

impl Expression {
    /// Source location of the expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Identifier(id) | Expression::PrivateName(id) => id.location,
            Expression::Literal(lit) => lit.location,
            Expression::TemplateLiteral(tpl) => tpl.location,
            Expression::FunctionExpression(func) => func.location,
            Expression::ArrowFunctionExpression(arrow) => arrow.location,
            Expression::ClassExpression(class) => class.location,
            Expression::ParenthesizedExpression { location, .. }
            | Expression::TaggedTemplateExpression { location, .. }
            | Expression::ThisExpression { location }
            | Expression::Super { location }
            | Expression::ArrayExpression { location, .. }
            | Expression::ObjectExpression { location, .. }
            | Expression::UnaryExpression { location, .. }
            | Expression::UpdateExpression { location, .. }
            | Expression::BinaryExpression { location, .. }
            | Expression::LogicalExpression { location, .. }
            | Expression::AssignmentExpression { location, .. }
            | Expression::ConditionalExpression { location, .. }
            | Expression::CallExpression { location, .. }
            | Expression::MemberExpression { location, .. }
            | Expression::NewExpression { location, .. }
            | Expression::MetaProperty { location, .. }
            | Expression::ImportExpression { location, .. }
            | Expression::SequenceExpression { location, .. }
            | Expression::YieldExpression { location, .. }
            | Expression::AwaitExpression { location, .. } => *location,
        }
    }
}

impl ExpressionOrSpread {
    /// Source location of the element
    pub fn location(&self) -> SourceLocation {
        match self {
            ExpressionOrSpread::Expression(expr) => expr.location(),
            ExpressionOrSpread::Spread(spread) => spread.location,
        }
    }
}

impl Pattern {
    /// Source location of the pattern
    pub fn location(&self) -> SourceLocation {
        match self {
            Pattern::Identifier(id) => id.location,
            Pattern::ObjectPattern { location, .. }
            | Pattern::ArrayPattern { location, .. }
            | Pattern::AssignmentPattern { location, .. }
            | Pattern::RestElement { location, .. } => *location,
            Pattern::MemberExpression { expression } => expression.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::SourcePosition;

    fn loc(start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(
            SourcePosition::new(0, start as u32, start),
            SourcePosition::new(0, end as u32, end),
        )
    }

    fn ident(name: &str, start: usize) -> Identifier {
        Identifier {
            name: name.to_string(),
            location: loc(start, start + name.len()),
        }
    }

    #[test]
    fn test_statement_location() {
        let stmt = Statement::EmptyStatement { location: loc(3, 4) };
        assert_eq!(stmt.location(), loc(3, 4));
    }

    #[test]
    fn test_binary_expression_serializes_operator_symbol() {
        let expr = Expression::BinaryExpression {
            operator: BinaryOperator::Add,
            left: Box::new(Expression::Identifier(ident("a", 0))),
            right: Box::new(Expression::Identifier(ident("b", 4))),
            location: loc(0, 5),
        };
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["type"], "BinaryExpression");
        assert_eq!(json["operator"], "+");
        assert_eq!(json["left"]["type"], "Identifier");
        assert_eq!(json["left"]["name"], "a");
    }

    #[test]
    fn test_spread_element_keeps_its_tag_when_untagged() {
        let element = ExpressionOrSpread::Spread(SpreadElement {
            argument: Expression::Identifier(ident("xs", 3)),
            location: loc(0, 5),
        });
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "SpreadElement");
        assert_eq!(json["argument"]["type"], "Identifier");
    }

    #[test]
    fn test_property_key_static_name() {
        assert_eq!(PropertyKey::Identifier(ident("get", 0)).static_name(), Some("get"));
        let computed = PropertyKey::Computed {
            expression: Box::new(Expression::Identifier(ident("k", 1))),
            location: loc(0, 3),
        };
        assert_eq!(computed.static_name(), None);
    }

    #[test]
    fn test_member_pattern_location_comes_from_expression() {
        let pattern = Pattern::MemberExpression {
            expression: Box::new(Expression::Identifier(ident("obj", 2))),
        };
        assert_eq!(pattern.location(), loc(2, 5));
    }
}
