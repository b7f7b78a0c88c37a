//! A small C# syntax model and its pretty printer.
//!
//! Generators describe a file as nested nodes instead of concatenating text:
//!
//! ```text
//! SourceFile ─ usings
//!            └ namespace ─ TypeDecl ─ attributes, header
//!                                   └ Member ─ Declarations (field lines)
//!                                            └ Method ─ attributes, signature, Block
//!                                                                         └ Stmt*
//! ```
//!
//! The printer owns indentation (four spaces) and braces, so every opened
//! scope is closed at the right depth no matter how the generator nests it.

/// One statement-level element of a [`Block`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A single line of code
    Line(String),
    /// An empty line
    Blank,
    /// `header`, then `{`, the body indented, then `close`
    Block {
        /// Text before the opening brace, e.g. `if (entity == null)`
        header: String,
        /// Statements inside the braces
        body: Block,
        /// Closing text, usually `}` but `};` or `});` for initializers
        close: String,
    },
    /// Statements indented one level without braces, e.g. a `case` body
    Indented(Block),
}

/// An ordered list of statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    /// An empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.stmts.push(Stmt::Line(text.into()));
        self
    }

    /// Append several lines
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stmts
            .extend(lines.into_iter().map(|l| Stmt::Line(l.into())));
        self
    }

    /// Append an empty line
    pub fn blank(mut self) -> Self {
        self.stmts.push(Stmt::Blank);
        self
    }

    /// Append a braced scope closed by `}`
    pub fn block(self, header: impl Into<String>, body: Block) -> Self {
        self.block_with_close(header, body, "}")
    }

    /// Append a braced scope with a custom closing line
    pub fn block_with_close(
        mut self,
        header: impl Into<String>,
        body: Block,
        close: impl Into<String>,
    ) -> Self {
        self.stmts.push(Stmt::Block {
            header: header.into(),
            body,
            close: close.into(),
        });
        self
    }

    /// Append statements one level deeper, without braces
    pub fn indented(mut self, body: Block) -> Self {
        self.stmts.push(Stmt::Indented(body));
        self
    }

    /// Append all statements of `other`
    pub fn append(mut self, other: Block) -> Self {
        self.stmts.extend(other.stmts);
        self
    }

    /// Apply `build` only when `condition` holds
    pub fn when(self, condition: bool, build: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            build(self)
        } else {
            self
        }
    }

    /// The statements in order
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }
}

/// A method, constructor or interface member signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    attributes: Vec<String>,
    signature: String,
    body: Option<Block>,
}

impl Method {
    /// A method with a body
    pub fn new(signature: impl Into<String>, body: Block) -> Self {
        Method {
            attributes: Vec::new(),
            signature: signature.into(),
            body: Some(body),
        }
    }

    /// A bodiless declaration, printed as `signature;`
    pub fn declaration(signature: impl Into<String>) -> Self {
        Method {
            attributes: Vec::new(),
            signature: signature.into(),
            body: None,
        }
    }

    /// Add an attribute, written without brackets, e.g. `HttpGet("{id}")`
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// The signature text
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// A member of a type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Consecutive single-line declarations, such as fields or constants
    Declarations(Vec<String>),
    /// A method or constructor
    Method(Method),
}

impl Member {
    fn is_declaration(&self) -> bool {
        matches!(self, Member::Method(Method { body: None, .. }))
    }
}

/// A class or interface declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    attributes: Vec<String>,
    header: String,
    members: Vec<Member>,
}

impl TypeDecl {
    /// A type with the given header, e.g. `public class PostService : IPostService`
    pub fn new(header: impl Into<String>) -> Self {
        TypeDecl {
            attributes: Vec::new(),
            header: header.into(),
            members: Vec::new(),
        }
    }

    /// Add an attribute, written without brackets
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Add a group of single-line declarations
    pub fn declarations<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if !lines.is_empty() {
            self.members.push(Member::Declarations(lines));
        }
        self
    }

    /// Add a method
    pub fn method(mut self, method: Method) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    /// Add several methods
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.members
            .extend(methods.into_iter().map(Member::Method));
        self
    }

    /// Members in declaration order
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Signatures of every method member
    pub fn method_signatures(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method.signature()),
            Member::Declarations(_) => None,
        })
    }
}

/// A complete `.cs` file: usings, one namespace, its types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    usings: Vec<String>,
    namespace: String,
    types: Vec<TypeDecl>,
}

impl SourceFile {
    /// An empty file in `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        SourceFile {
            usings: Vec::new(),
            namespace: namespace.into(),
            types: Vec::new(),
        }
    }

    /// Add a `using` directive; duplicates are ignored
    pub fn using(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        if !self.usings.contains(&namespace) {
            self.usings.push(namespace);
        }
        self
    }

    /// Add a type declaration
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    /// Pretty-print the file
    pub fn render(&self) -> String {
        let mut printer = Printer::default();
        for using in &self.usings {
            printer.line(&format!("using {using};"));
        }
        if !self.usings.is_empty() {
            printer.line("");
        }
        printer.open(&format!("namespace {}", self.namespace));
        for (i, decl) in self.types.iter().enumerate() {
            if i > 0 {
                printer.line("");
            }
            printer.type_decl(decl);
        }
        printer.close("}");
        printer.out
    }
}

const INDENT: &str = "    ";

#[derive(Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self, close: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(close);
    }

    fn attributes(&mut self, attributes: &[String]) {
        for attribute in attributes {
            self.line(&format!("[{attribute}]"));
        }
    }

    fn type_decl(&mut self, decl: &TypeDecl) {
        self.attributes(&decl.attributes);
        self.open(&decl.header);
        let mut previous: Option<&Member> = None;
        for member in &decl.members {
            // Bodiless declarations (interface members) stay in one tight group
            if previous.is_some_and(|p| !(p.is_declaration() && member.is_declaration())) {
                self.line("");
            }
            previous = Some(member);
            match member {
                Member::Declarations(lines) => {
                    for line in lines {
                        self.line(line);
                    }
                }
                Member::Method(method) => self.method(method),
            }
        }
        self.close("}");
    }

    fn method(&mut self, method: &Method) {
        self.attributes(&method.attributes);
        match &method.body {
            Some(body) => {
                self.open(&method.signature);
                self.block(body);
                self.close("}");
            }
            None => self.line(&format!("{};", method.signature)),
        }
    }

    fn block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            match stmt {
                Stmt::Line(text) => self.line(text),
                Stmt::Blank => self.line(""),
                Stmt::Block {
                    header,
                    body,
                    close,
                } => {
                    self.open(header);
                    self.block(body);
                    self.close(close);
                }
                Stmt::Indented(body) => {
                    self.depth += 1;
                    self.block(body);
                    self.depth -= 1;
                }
            }
        }
    }
}
