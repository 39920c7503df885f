use std::collections::HashSet;

use syn::{
    braced, bracketed, ext::IdentExt, parenthesized, parse::ParseStream, punctuated::Punctuated, token, Expr,
    Ident, Lit, LitBool, LitStr,
};

use crate::*;

/// One value of the `pattern!` syntax
pub enum Node {
    Null,
    Bool(LitBool),
    Number(Number),
    Str(LitStr),
    Regex(RegexLit),
    Array(Vec<Node>),
    Object(Vec<Entry>),
    /// `(expr)`
    Expr(Expr),
    /// A bare identifier other than `null`, `true` or `false`. Reported during validation, so that it can be
    /// reported together with other errors.
    Unknown(Ident),
}

const KEYWORDS: &[&str] = &["null", "true", "false"];

pub struct Entry {
    pub key: Key,
    pub value: Node,
}

/// The key of an object entry: `"key"` or `key`
pub struct Key {
    pub name: String,
    pub span: Span,
}

/// A number literal, with the sign already applied
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Parse for Node {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(token::Brace) {
            let content;
            braced!(content in input);
            let entries = Punctuated::<Entry, Token![,]>::parse_terminated(&content)?;
            Ok(Node::Object(entries.into_iter().collect()))
        } else if lookahead.peek(token::Bracket) {
            let content;
            bracketed!(content in input);
            let items = Punctuated::<Node, Token![,]>::parse_terminated(&content)?;
            Ok(Node::Array(items.into_iter().collect()))
        } else if lookahead.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            Ok(Node::Expr(content.parse()?))
        } else if lookahead.peek(Token![/]) {
            Ok(Node::Regex(input.parse()?))
        } else if lookahead.peek(Token![-]) {
            input.parse::<Token![-]>()?;
            let number = Number::parse_lit(&input.parse()?, true)?;
            Ok(Node::Number(number))
        } else if lookahead.peek(Lit) {
            match input.parse::<Lit>()? {
                Lit::Str(s) => Ok(Node::Str(s)),
                Lit::Bool(b) => Ok(Node::Bool(b)),
                lit @ (Lit::Int(_) | Lit::Float(_)) => Ok(Node::Number(Number::parse_lit(&lit, false)?)),
                lit => Err(syn::Error::new_spanned(
                    lit,
                    "only string, number and boolean literals are allowed in a pattern",
                )),
            }
        } else if lookahead.peek(Ident::peek_any) {
            let ident = input.call(Ident::parse_any)?;
            if ident == "null" {
                Ok(Node::Null)
            } else {
                Ok(Node::Unknown(ident))
            }
        } else {
            Err(lookahead.error())
        }
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        let key = if lookahead.peek(LitStr) {
            let lit = input.parse::<LitStr>()?;
            Key {
                name: lit.value(),
                span: lit.span(),
            }
        } else if lookahead.peek(Ident::peek_any) {
            // parse_any, so that keywords like `type` can be used as keys
            let ident = input.call(Ident::parse_any)?;
            Key {
                name: ident.unraw().to_string(),
                span: ident.span(),
            }
        } else {
            return Err(lookahead.error());
        };
        if input.is_empty() {
            let msg = format!("missing value for key \"{}\"", key.name);
            return Err(syn::Error::new(key.span, msg));
        }
        input.parse::<Token![:]>()?;
        let value = input.parse()?;
        Ok(Entry { key, value })
    }
}

impl Number {
    fn parse_lit(lit: &Lit, negative: bool) -> syn::Result<Self> {
        match lit {
            Lit::Int(int) => {
                if !int.suffix().is_empty() {
                    return Err(syn::Error::new_spanned(int, "number suffixes are not allowed in a pattern"));
                }
                let value = int.base10_parse::<u64>()?;
                if !negative {
                    return Ok(Number::UInt(value));
                }
                i64::try_from(-(value as i128))
                    .map(Number::Int)
                    .map_err(|_| syn::Error::new_spanned(int, "number too small to fit in an i64"))
            }
            Lit::Float(float) => {
                if !float.suffix().is_empty() {
                    return Err(syn::Error::new_spanned(float, "number suffixes are not allowed in a pattern"));
                }
                let value = float.base10_parse::<f64>()?;
                if !value.is_finite() {
                    return Err(syn::Error::new_spanned(float, "number out of range for an f64"));
                }
                Ok(Number::Float(if negative { -value } else { value }))
            }
            lit => Err(syn::Error::new_spanned(lit, "expected a number after `-`")),
        }
    }
}

impl Node {
    /// Adds every problem in this tree to `errors`.
    pub fn validate(&self, errors: &mut ErrorBuilder) {
        match self {
            Node::Null | Node::Bool(_) | Node::Number(_) | Node::Str(_) | Node::Expr(_) => {}
            Node::Regex(regex) => regex.validate(errors),
            Node::Array(items) => items.iter().for_each(|item| item.validate(errors)),
            Node::Object(entries) => {
                let mut seen = HashSet::new();
                for entry in entries {
                    if !seen.insert(entry.key.name.as_str()) {
                        let msg = format!("duplicate key \"{}\"", entry.key.name);
                        errors.with_error(Error::new(entry.key.span, msg));
                    }
                    entry.value.validate(errors);
                }
            }
            Node::Unknown(ident) => {
                let name = ident.to_string();
                let msg = match find_closest(&name, KEYWORDS) {
                    Some(keyword) => format!("unknown value `{}`. Did you mean `{}`?", name, keyword),
                    None => format!(
                        "unknown value `{}`. Expected a literal, {}, a regex like /\"...\"/, an array, an object or an expression in parentheses",
                        name,
                        list_items(KEYWORDS, |k| format!("`{}`", k))
                    ),
                };
                errors.with_spanned(ident, msg);
            }
        }
    }
}

impl ToTokens for Node {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let generated = match self {
            Node::Null => quote!(::objectron::Pattern::Null),
            Node::Bool(b) => quote!(::objectron::Pattern::Bool(#b)),
            Node::Number(number) => {
                let lit = match number {
                    Number::Int(i) => Literal::i64_suffixed(*i),
                    Number::UInt(u) => Literal::u64_suffixed(*u),
                    Number::Float(f) => Literal::f64_suffixed(*f),
                };
                quote!(::objectron::Pattern::from(#lit))
            }
            Node::Str(s) => quote!(::objectron::Pattern::String(::std::string::String::from(#s))),
            Node::Regex(regex) => regex.to_token_stream(),
            Node::Array(items) => quote!(::objectron::Pattern::Array(::std::vec![#(#items),*])),
            Node::Object(entries) => {
                let keys = entries.iter().map(|e| LitStr::new(&e.key.name, e.key.span));
                let values = entries.iter().map(|e| &e.value);
                quote!(::objectron::__macro_utilities::object([#((#keys, #values)),*]))
            }
            Node::Expr(expr) => {
                // `Pattern::from(expr)`, spanned so that a missing `From` impl underlines the whole expression.
                // The expression itself keeps its own spans.
                let span = FullSpan::from_spanned(expr);
                let function = span.apply(quote!(::objectron::Pattern), quote!(::from));
                quote!(#function(#expr))
            }
            // rejected by `validate` before any code is generated
            Node::Unknown(_) => quote!(::objectron::Pattern::Null),
        };
        tokens.extend(generated);
    }
}
