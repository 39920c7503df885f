use syn::{ext::IdentExt, parse::ParseStream, Ident, LitStr};

use crate::*;

const VALID_FLAGS: &[char] = &['i', 'm', 's', 'x', 'U', 'u'];

/// A regex in the form `/"source"/flags`
pub struct RegexLit {
    source: LitStr,
    flags: Option<Ident>,
}

impl Parse for RegexLit {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let open = input.parse::<Token![/]>()?;
        if !input.peek(LitStr) {
            let msg = "regexes have to be written as a string literal between slashes, like /\"a+b\"/ or /r\"\\d+\"/";
            return Err(syn::Error::new_spanned(open, msg));
        }
        let source = input.parse::<LitStr>()?;
        if !input.peek(Token![/]) {
            return Err(syn::Error::new_spanned(&source, "missing closing `/` after the regex"));
        }
        input.parse::<Token![/]>()?;
        let flags = if input.peek(Ident::peek_any) {
            if input.peek2(Token![:]) {
                // `/"x"/ key: ...` is the next entry of an object, not a set of flags
                return Err(input.error("expected `,` after the regex"));
            }
            Some(input.call(Ident::parse_any)?)
        } else {
            None
        };
        Ok(RegexLit { source, flags })
    }
}

impl RegexLit {
    fn flags_str(&self) -> String {
        self.flags.as_ref().map(|f| f.to_string()).unwrap_or_default()
    }

    /// Parses the regex the same way the `regex` crate will at runtime and adds any errors to `errors`.
    pub fn validate(&self, errors: &mut ErrorBuilder) {
        let mut parser = regex_syntax::ParserBuilder::new();
        for flag in self.flags_str().chars() {
            match flag {
                'i' => parser.case_insensitive(true),
                'm' => parser.multi_line(true),
                's' => parser.dot_matches_new_line(true),
                'x' => parser.ignore_whitespace(true),
                'U' => parser.swap_greed(true),
                'u' => &mut parser,
                flag => {
                    let msg = format!(
                        "unknown regex flag '{}'. Valid flags are {}. If `{}` is not meant as flags, a `,` is missing after the regex",
                        flag,
                        list_items(VALID_FLAGS, |f| format!("'{}'", f)),
                        self.flags_str()
                    );
                    errors.with_spanned(&self.flags, msg);
                    return;
                }
            };
        }
        if let Err(err) = parser.build().parse(&self.source.value()) {
            errors.with_spanned(&self.source, format!("invalid regex: {}", err));
        }
    }
}

impl ToTokens for RegexLit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let source = &self.source;
        let flags = LitStr::new(&self.flags_str(), source.span());
        // one static per regex, so that it is only compiled the first time this code runs
        tokens.extend(quote!({
            ::objectron::__macro_utilities::lazy_static! {
                static ref REGEX: ::objectron::RegexPattern =
                    ::objectron::__macro_utilities::compile_regex(#source, #flags);
            }
            ::objectron::Pattern::Regex(::std::clone::Clone::clone(&*REGEX))
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(input: &str) -> String {
        match syn::parse_str::<Node>(input) {
            Ok(node) => {
                let mut errors = Error::builder();
                node.validate(&mut errors);
                errors.build().to_compile_error().to_string()
            }
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn missing_comma_before_key() {
        assert_eq!(errors_of(r#"{ "a": /"x"/ b: 1 }"#), "expected `,` after the regex");
        assert_eq!(errors_of(r#"{ "a": /"x"/i b: 1 }"#), "expected `,`");
    }

    #[test]
    fn unknown_flags() {
        let errors = errors_of(r#"[/"x"/ null]"#);
        assert!(errors.contains("unknown regex flag"), "{}", errors);
        assert!(errors.contains("If `null` is not meant as flags, a `,` is missing after the regex"), "{}", errors);

        assert_eq!(errors_of(r#"[/"x"/im, /"y"/]"#), "");
    }
}
