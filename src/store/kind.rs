//! Markup declaration kinds.

/// The kind of a markup declaration, one per markup keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    Alias,
    Anchor,
    Bug,
    Class,
    Code,
    Column,
    Comment,
    Const,
    Define,
    Deprecated,
    Description,
    Details,
    Duration,
    Enum,
    EnumClass,
    Example,
    Experimental,
    External,
    File,
    Filter,
    Formula,
    Function,
    Height,
    Illustration,
    Image,
    In,
    Legend,
    Line,
    Link,
    List,
    Literal,
    Member,
    Method,
    NoExample,
    NoJustify,
    Outdent,
    Param,
    PhraseDef,
    PhraseParam,
    PhraseRef,
    Platform,
    Populate,
    Private,
    Return,
    Row,
    SeeAlso,
    Set,
    StdOut,
    Struct,
    Substitute,
    Subtopic,
    Table,
    Template,
    Text,
    ToDo,
    Topic,
    Typedef,
    Union,
    Using,
    Volatile,
    Width,
}

impl DeclKind {
    /// Kinds that own a scope table.
    pub fn is_root(&self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Enum | Self::EnumClass | Self::Topic | Self::Subtopic
        )
    }

    /// Roots whose members are qualified with `::`.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::EnumClass)
    }

    /// Roots whose members are qualified with `_`.
    pub fn is_topic_like(&self) -> bool {
        matches!(self, Self::Topic | Self::Subtopic)
    }

    /// Kinds that may stay unreferenced without a consistency finding.
    pub fn incomplete_allowed(&self) -> bool {
        matches!(self, Self::Deprecated | Self::Experimental | Self::Private)
    }

    /// Non-root declarations that register in their enclosing root's table.
    pub fn is_scope_leaf(&self) -> bool {
        matches!(
            self,
            Self::Alias
                | Self::Const
                | Self::Define
                | Self::Function
                | Self::Member
                | Self::Method
                | Self::Typedef
                | Self::Union
        )
    }

    pub fn is_method_like(&self) -> bool {
        matches!(self, Self::Method | Self::Function)
    }

    /// Scope separator used when qualifying names inside this root.
    pub fn separator(&self) -> &'static str {
        if self.is_topic_like() { "_" } else { "::" }
    }

    /// The markup keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Alias => "Alias",
            Self::Anchor => "Anchor",
            Self::Bug => "Bug",
            Self::Class => "Class",
            Self::Code => "Code",
            Self::Column => "Column",
            Self::Comment => "Comment",
            Self::Const => "Const",
            Self::Define => "Define",
            Self::Deprecated => "Deprecated",
            Self::Description => "Description",
            Self::Details => "Details",
            Self::Duration => "Duration",
            Self::Enum => "Enum",
            Self::EnumClass => "EnumClass",
            Self::Example => "Example",
            Self::Experimental => "Experimental",
            Self::External => "External",
            Self::File => "File",
            Self::Filter => "Filter",
            Self::Formula => "Formula",
            Self::Function => "Function",
            Self::Height => "Height",
            Self::Illustration => "Illustration",
            Self::Image => "Image",
            Self::In => "In",
            Self::Legend => "Legend",
            Self::Line => "Line",
            Self::Link => "Link",
            Self::List => "List",
            Self::Literal => "Literal",
            Self::Member => "Member",
            Self::Method => "Method",
            Self::NoExample => "NoExample",
            Self::NoJustify => "NoJustify",
            Self::Outdent => "Outdent",
            Self::Param => "Param",
            Self::PhraseDef => "PhraseDef",
            Self::PhraseParam => "PhraseParam",
            Self::PhraseRef => "PhraseRef",
            Self::Platform => "Platform",
            Self::Populate => "Populate",
            Self::Private => "Private",
            Self::Return => "Return",
            Self::Row => "Row",
            Self::SeeAlso => "SeeAlso",
            Self::Set => "Set",
            Self::StdOut => "StdOut",
            Self::Struct => "Struct",
            Self::Substitute => "Substitute",
            Self::Subtopic => "Subtopic",
            Self::Table => "Table",
            Self::Template => "Template",
            Self::Text => "Text",
            Self::ToDo => "ToDo",
            Self::Topic => "Topic",
            Self::Typedef => "Typedef",
            Self::Union => "Union",
            Self::Using => "Using",
            Self::Volatile => "Volatile",
            Self::Width => "Width",
        }
    }

    /// Parse a markup keyword (without its markup character).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.keyword() == keyword)
    }

    pub const ALL: [DeclKind; 61] = [
        Self::Alias,
        Self::Anchor,
        Self::Bug,
        Self::Class,
        Self::Code,
        Self::Column,
        Self::Comment,
        Self::Const,
        Self::Define,
        Self::Deprecated,
        Self::Description,
        Self::Details,
        Self::Duration,
        Self::Enum,
        Self::EnumClass,
        Self::Example,
        Self::Experimental,
        Self::External,
        Self::File,
        Self::Filter,
        Self::Formula,
        Self::Function,
        Self::Height,
        Self::Illustration,
        Self::Image,
        Self::In,
        Self::Legend,
        Self::Line,
        Self::Link,
        Self::List,
        Self::Literal,
        Self::Member,
        Self::Method,
        Self::NoExample,
        Self::NoJustify,
        Self::Outdent,
        Self::Param,
        Self::PhraseDef,
        Self::PhraseParam,
        Self::PhraseRef,
        Self::Platform,
        Self::Populate,
        Self::Private,
        Self::Return,
        Self::Row,
        Self::SeeAlso,
        Self::Set,
        Self::StdOut,
        Self::Struct,
        Self::Substitute,
        Self::Subtopic,
        Self::Table,
        Self::Template,
        Self::Text,
        Self::ToDo,
        Self::Topic,
        Self::Typedef,
        Self::Union,
        Self::Using,
        Self::Volatile,
        Self::Width,
    ];
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
