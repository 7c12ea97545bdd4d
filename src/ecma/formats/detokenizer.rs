//! Token chains back to source text, and a plain token listing.

use crate::ecma::token::TokenChain;

/// Rebuild the source from a chain. Lexing is lossless, so this returns the exact input.
pub fn detokenize(chain: &TokenChain) -> String {
    let mut source = String::new();
    for line in chain.lines() {
        for token in &chain.tokens()[line.tokens.clone()] {
            source.push_str(&token.text);
        }
        source.push_str(&line.ending);
    }
    source
}

/// One token per line: `<line>:<column> <kind> <text as debug string>`.
pub fn to_token_listing(chain: &TokenChain) -> String {
    chain
        .iter()
        .map(|(_, token)| {
            format!(
                "{}:{} {} {:?}\n",
                token.line_number,
                token.start_index,
                token.kind.as_str(),
                token.text
            )
        })
        .collect()
}
