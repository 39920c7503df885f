//! Crate with proc_macros for [objectron](https://crates.io/crates/objectron). Not usable as a standalone crate.

use proc_macro::TokenStream as TokenStream1;
use proc_macro2::{Literal, Span, TokenStream};
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Token,
};

mod error;
mod node;
mod regex_lit;
mod utils;

pub(crate) use error::*;
pub(crate) use node::*;
pub(crate) use regex_lit::*;
pub(crate) use utils::*;

/// The input of `pattern!`: exactly one value
struct PatternInput {
    root: Node,
}

impl Parse for PatternInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            let msg = "Missing parameter: pattern!() requires a value, like pattern!({ \"key\": \"value\" })";
            return Err(syn::Error::new(Span::call_site(), msg));
        }
        let root = input.parse()?;
        if !input.is_empty() {
            // the most likely cause is a second value without surrounding brackets
            let msg = "unexpected tokens after the pattern. Multiple values have to be wrapped in [ ] or { }";
            return Err(input.error(msg));
        }
        Ok(PatternInput { root })
    }
}

#[proc_macro]
pub fn pattern(input: TokenStream1) -> TokenStream1 {
    let input = parse_macro_input!(input as PatternInput);
    match pattern_internal(&input.root) {
        Ok(res) => res.into(),
        Err(err) => err.into(),
    }
}

fn pattern_internal(root: &Node) -> Result<TokenStream> {
    let mut errors = Error::builder();
    root.validate(&mut errors);
    errors.ok_or_build()?;
    Ok(quote!({ #root }))
}
