//! Token kinds for the query language.
//!
//! Logos derives recognition for the shapes that are lexed directly. Keyword and
//! date-function kinds carry no `#[token]`/`#[regex]` attribute: identifiers are
//! lexed first and then classified against [`keyword`] and [`date_function`].

use logos::Logos;

/// All token kinds. Discriminants must stay below 64 so every kind fits in a [`TokenSet`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    #[token(":")]
    Colon,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Lt,

    #[token("<=")]
    Le,

    #[token(">")]
    Gt,

    #[token(">=")]
    Ge,

    /// `'...'` with backslash escapes. Escapes are decoded by the parser.
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    Str,

    /// A string whose closing quote never arrives. Spans to end of input.
    #[regex(r"'(?:[^'\\]|\\.)*\\?", allow_greedy = true)]
    UnterminatedStr,

    /// Decimal, `0x`/`0b`/`0o` integers and signed infinities. `NaN` and a bare
    /// `Infinity` are lexed as identifiers and reclassified.
    #[regex(r"-?[0-9]+(?:\.[0-9]+)?")]
    #[regex(r"-?0[xX][0-9A-Fa-f]+")]
    #[regex(r"-?0[bB][01]+")]
    #[regex(r"-?0[oO][0-7]+")]
    #[regex(r"[+-][Ii][Nn][Ff][Ii][Nn][Ii][Tt][Yy]")]
    Number,

    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}")]
    Date,

    /// Zone suffix is optional here; the parser rejects date-times without one.
    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?")]
    DateTime,

    #[regex(r"[0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?Z?")]
    Time,

    /// Looks like a date or date-time but has the wrong shape (`2024-1-1`,
    /// `2024-01-01T10:00Z`). Loses every tie against `Date` and `DateTime`.
    #[regex(r"[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:T[0-9:.+\-Z]*)?", priority = 1)]
    MalformedDate,

    #[regex(r":[A-Za-z_$][A-Za-z0-9_$]*")]
    BindVar,

    /// Plain or dotted identifier (`Account.Owner.Name`).
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*")]
    Ident,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"--[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// Relative date literal such as `TODAY` or `LAST_N_DAYS`.
    DateFunction,

    /// Run of characters the lexer does not recognise.
    Unknown,

    /// Synthesized by the parser once the token stream is exhausted.
    Eof,

    KwSelect,
    KwFrom,
    KwWhere,
    KwAnd,
    KwOr,
    KwNot,
    KwIn,
    KwLike,
    KwOrder,
    KwBy,
    KwAsc,
    KwDesc,
    KwNulls,
    KwFirst,
    KwLast,
    KwGroup,
    KwHaving,
    KwLimit,
    KwOffset,
    KwFor,
    KwTypeof,
    KwWhen,
    KwThen,
    KwElse,
    KwEnd,
    KwAs,
    KwTrue,
    KwFalse,
    KwNull,
}

use TokenKind::*;

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("SELECT", KwSelect),
    ("FROM", KwFrom),
    ("WHERE", KwWhere),
    ("AND", KwAnd),
    ("OR", KwOr),
    ("NOT", KwNot),
    ("IN", KwIn),
    ("LIKE", KwLike),
    ("ORDER", KwOrder),
    ("BY", KwBy),
    ("ASC", KwAsc),
    ("DESC", KwDesc),
    ("NULLS", KwNulls),
    ("FIRST", KwFirst),
    ("LAST", KwLast),
    ("GROUP", KwGroup),
    ("HAVING", KwHaving),
    ("LIMIT", KwLimit),
    ("OFFSET", KwOffset),
    ("FOR", KwFor),
    ("TYPEOF", KwTypeof),
    ("WHEN", KwWhen),
    ("THEN", KwThen),
    ("ELSE", KwElse),
    ("END", KwEnd),
    ("AS", KwAs),
    ("TRUE", KwTrue),
    ("FALSE", KwFalse),
    ("NULL", KwNull),
];

/// Relative date literals and whether they take a mandatory `:N` argument.
const DATE_FUNCTIONS: &[(&str, bool)] = &[
    ("YESTERDAY", false),
    ("TODAY", false),
    ("TOMORROW", false),
    ("LAST_WEEK", false),
    ("THIS_WEEK", false),
    ("NEXT_WEEK", false),
    ("LAST_MONTH", false),
    ("THIS_MONTH", false),
    ("NEXT_MONTH", false),
    ("LAST_90_DAYS", false),
    ("NEXT_90_DAYS", false),
    ("THIS_QUARTER", false),
    ("LAST_QUARTER", false),
    ("NEXT_QUARTER", false),
    ("THIS_YEAR", false),
    ("LAST_YEAR", false),
    ("NEXT_YEAR", false),
    ("THIS_FISCAL_QUARTER", false),
    ("LAST_FISCAL_QUARTER", false),
    ("NEXT_FISCAL_QUARTER", false),
    ("THIS_FISCAL_YEAR", false),
    ("LAST_FISCAL_YEAR", false),
    ("NEXT_FISCAL_YEAR", false),
    ("LAST_N_DAYS", true),
    ("NEXT_N_DAYS", true),
    ("LAST_N_WEEKS", true),
    ("NEXT_N_WEEKS", true),
    ("LAST_N_MONTHS", true),
    ("NEXT_N_MONTHS", true),
    ("LAST_N_QUARTERS", true),
    ("NEXT_N_QUARTERS", true),
    ("LAST_N_YEARS", true),
    ("NEXT_N_YEARS", true),
    ("LAST_N_FISCAL_QUARTERS", true),
    ("NEXT_N_FISCAL_QUARTERS", true),
    ("LAST_N_FISCAL_YEARS", true),
    ("NEXT_N_FISCAL_YEARS", true),
];

/// Case-insensitive keyword lookup.
pub fn keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(text))
        .map(|&(_, kind)| kind)
}

/// Case-insensitive date-function lookup.
///
/// Returns the canonical (uppercase) name and whether the function takes `:N`.
pub fn date_function(text: &str) -> Option<(&'static str, bool)> {
    DATE_FUNCTIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(text))
        .copied()
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | LineComment | BlockComment)
    }

    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    /// Keywords that never name a field, object or type. `ORDER` and `GROUP`
    /// are only reserved in front of `BY`, which the parser checks itself.
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            KwSelect | KwFrom | KwWhere | KwHaving | KwLimit | KwOffset
        )
    }

    /// Canonical spelling of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(name, _)| name)
    }

    /// Human-readable description used in "expected ..." messages.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.keyword_text() {
            return text;
        }
        match self {
            ParenOpen => "`(`",
            ParenClose => "`)`",
            Comma => "`,`",
            Star => "`*`",
            Colon => "`:`",
            Eq => "`=`",
            NotEq => "`!=`",
            Lt => "`<`",
            Le => "`<=`",
            Gt => "`>`",
            Ge => "`>=`",
            Str => "string literal",
            UnterminatedStr => "unterminated string literal",
            Number => "number",
            Date => "date literal",
            DateTime => "date-time literal",
            Time => "time literal",
            MalformedDate => "malformed date literal",
            BindVar => "bind variable",
            Ident => "identifier",
            Whitespace => "whitespace",
            LineComment | BlockComment => "comment",
            DateFunction => "date function",
            Unknown => "unrecognised input",
            Eof => "end of input",
            _ => "keyword",
        }
    }
}

/// 64-bit bitset of `TokenKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenSet({:#018x})", self.0)
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a literal value, in comparisons and `IN (...)` lists alike.
    pub const VALUE_FIRST: TokenSet = TokenSet::new(&[
        Str,
        Number,
        Date,
        DateTime,
        Time,
        MalformedDate,
        DateFunction,
        BindVar,
        KwTrue,
        KwFalse,
        KwNull,
    ]);
}
