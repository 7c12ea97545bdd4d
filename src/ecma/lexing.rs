//! Lexer
//!
//!     Lexing turns source text into a [TokenChain](crate::ecma::token::TokenChain). It is a
//!     finite automaton over named modes (code, strings, block/line/doc comments, the
//!     parameter list after `function`). Each mode owns an ordered matcher table, see
//!     [grammar]. At every offset the tokenizer tries the current mode's matchers in order;
//!     the first that matches emits one token and may switch the mode.
//!
//! Unmatched Text
//!
//!     No input is rejected. Characters no matcher accepts are collected into a single token
//!     of the mode's default kind: NORMAL in code, COMMENT inside doc comments. Pathological
//!     input only gives a poor token stream.
//!
//! Lines
//!
//!     The source is processed line by line with terminators stripped first. An empty line is
//!     a single BLANK_LINE token. The mode survives line ends, which is how multi-line
//!     comments and strings are lexed, and the mode left after the last line is reported so
//!     callers can detect a file that ends inside an unterminated construct.
//!
//! Pattern Literals
//!
//!     `/` is either division or the start of a pattern literal. A pattern literal is only
//!     accepted when what follows it cannot follow a divisor (`;`, `,`, `.`, `)`, `]`, `:`,
//!     `}`, a comment, or the end of the line). This is a heuristic: in `if (/ab/ && ok)` the
//!     literal is followed by an operator and is lexed as two divisions around `ab`.

pub mod grammar;
pub mod matcher;
pub mod modes;
pub mod scanners;
pub mod tokenizer;

pub use modes::LexerMode;
pub use tokenizer::{tokenize, Lexed, Tokenizer};
