use crate::*;

/// The first and last span of a piece of source code.
///
/// Joining spans is not possible on stable Rust. Generated code that is spanned with the first span at its start
/// and the last span at its end makes the compiler underline the whole range, like `syn::Error::new_spanned`
/// does. Used for the `Pattern::from` call around `(expr)` values.
#[derive(Copy, Clone)]
pub struct FullSpan(Span, Span);

impl FullSpan {
    pub fn from_spanned<T: ToTokens + syn::spanned::Spanned>(span: &T) -> Self {
        let start = span.span();
        let end = span
            .to_token_stream()
            .into_iter()
            .last()
            .map(|t| t.span())
            .unwrap_or(start);
        Self(start, end)
    }
    pub fn apply(self, a: TokenStream, b: TokenStream) -> TokenStream {
        let mut ret = a.with_span(self.0);
        ret.extend(b.with_span(self.1));
        ret
    }
}

/// Finds the closest match to `s` in `compare`, for "did you mean" hints.
pub fn find_closest<'a>(s: &str, compare: &[&'a str]) -> Option<&'a str> {
    let mut best_confidence = 0.7; // minimum confidence
    let mut best_match = None;
    for valid in compare {
        let confidence = strsim::jaro_winkler(s, valid);
        if confidence > best_confidence {
            best_confidence = confidence;
            best_match = Some(*valid);
        }
    }
    best_match
}

/// Formats a list like `a, b, or c`.
pub fn list_items<T>(items: &[T], mut display: impl FnMut(&T) -> String) -> String {
    match items {
        [] => String::new(),
        [x] => display(x),
        [a, b] => format!("{} or {}", display(a), display(b)),
        [start @ .., last] => {
            let mut s = String::new();
            for item in start {
                s += &display(item);
                s += ", ";
            }
            s += "or ";
            s += &display(last);
            s
        }
    }
}

/// Extension trait for [`TokenStream`] that allows setting the span of all tokens in the stream.
pub trait TokenStreamExt {
    fn with_span(self, span: Span) -> Self;
}
impl TokenStreamExt for TokenStream {
    fn with_span(self, span: Span) -> Self {
        self.into_iter()
            .map(|mut t| {
                if let proc_macro2::TokenTree::Group(ref mut g) = t {
                    *g = proc_macro2::Group::new(g.delimiter(), g.stream().with_span(span));
                }
                t.set_span(span);
                t
            })
            .collect()
    }
}
