use serde_json::{Map, Value};

use crate::path::PathChain;
use crate::pattern::numbers_eq;
use crate::{
    ArrayPolicy, ExtraKeys, Groups, MatchOptions, MatchResult, Mismatch, MismatchKind, NodeKind, Pattern,
};

/// Matches a payload against a pattern with the default [`MatchOptions`].
///
/// Shorthand for `Matcher::default().match_payload(payload, pattern)`. See [`Matcher::match_payload`].
pub fn match_payload(payload: &Value, pattern: &Pattern) -> MatchResult {
    Matcher::default().match_payload(payload, pattern)
}

/// Matches payloads against patterns, with a fixed set of [`MatchOptions`].
///
/// A `Matcher` holds no state besides its options, so it can be shared freely between threads.
///
/// ```
/// use objectron::{pattern, MatchOptions, Matcher};
/// use serde_json::json;
///
/// let payload = json!({ "items": [0, 1, 2, 3] });
/// let p = pattern!({ "items": [3, 2, 1, 0] });
///
/// assert!(Matcher::default().match_payload(&payload, &p).is_match);
///
/// let ordered = Matcher::new(MatchOptions::builder().ordered_arrays().build());
/// let result = ordered.match_payload(&payload, &p);
/// assert!(!result.is_match);
/// assert_eq!(result.mismatch.unwrap().path, "/items/0");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    options: MatchOptions,
}

/// Everything that is collected while walking the tree.
#[derive(Default)]
struct State {
    total: usize,
    groups: Groups,
    mismatch: Option<Mismatch>,
    /// Set while pairing up elements of an unordered array, where failures are expected and not logged
    trial: bool,
}

impl State {
    fn trial() -> Self {
        State {
            trial: true,
            ..State::default()
        }
    }
    fn failed(&self) -> bool {
        self.mismatch.is_some()
    }
}

/// A successful match of one element of an unordered array pattern against one payload element.
struct Trial {
    value: Value,
    total: usize,
    groups: Groups,
}

impl Matcher {
    /// Creates a matcher with the given options.
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// The options of this matcher.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Matches `payload` against `pattern`.
    ///
    /// This never fails: missing keys, type mismatches and regexes that don't match all result in a
    /// [`MatchResult`] with `is_match == false`, and [`MatchResult::mismatch`] describes the first failure.
    ///
    /// The pattern is walked depth-first:
    /// - **Objects**: the payload has to be an object containing every key of the pattern. Keys are visited in
    ///   pattern order.
    /// - **Arrays**: the payload has to be an array of the same length, paired up according to
    ///   [`ArrayPolicy`].
    /// - **Regexes**: the payload has to be a string that the regex finds a match in. All named capture groups are
    ///   added to [`MatchResult::groups`].
    /// - **Literals**: the payload has to be equal. Numbers are compared by value, so `1` equals `1.0`.
    ///
    /// Matching stops at the first failure.
    #[tracing::instrument(level = "trace", skip_all, fields(options = ?self.options))]
    pub fn match_payload(&self, payload: &Value, pattern: &Pattern) -> MatchResult {
        let mut state = State::default();
        let matches = self.visit(payload, pattern, &PathChain::root(), &mut state);
        tracing::trace!(total = state.total, is_match = !state.failed(), "match finished");
        MatchResult {
            is_match: !state.failed(),
            total: state.total,
            matches: matches.unwrap_or(Value::Null),
            groups: state.groups,
            mismatch: state.mismatch,
        }
    }

    /// Shorthand for `self.match_payload(payload, pattern).is_match`.
    pub fn is_match(&self, payload: &Value, pattern: &Pattern) -> bool {
        self.match_payload(payload, pattern).is_match
    }

    /// Returns the reconstruction of the node, or `None` if the node failed before anything could be matched.
    /// Containers that fail halfway return what they matched so far, with the mismatch recorded in `state`.
    fn visit(&self, payload: &Value, pattern: &Pattern, path: &PathChain<'_>, state: &mut State) -> Option<Value> {
        match pattern {
            Pattern::Object(obj) => {
                let Value::Object(fields) = payload else {
                    return fail(state, path, type_mismatch(NodeKind::Object, payload));
                };
                if self.options.extra_keys == ExtraKeys::Reject {
                    if let Some(extra) = fields.keys().find(|key| !obj.contains_key(key)) {
                        let kind = MismatchKind::UnexpectedKey { key: extra.clone() };
                        return fail(state, &path.key(extra), kind);
                    }
                }
                let mut out = Map::new();
                for (key, sub_pattern) in obj.iter() {
                    let path = path.key(key);
                    let Some(value) = fields.get(key) else {
                        fail(state, &path, MismatchKind::MissingKey);
                        break;
                    };
                    if let Some(matched) = self.visit(value, sub_pattern, &path, state) {
                        out.insert(key.to_owned(), matched);
                    }
                    if state.failed() {
                        break;
                    }
                }
                Some(Value::Object(out))
            }
            Pattern::Array(items) => {
                let Value::Array(elements) = payload else {
                    return fail(state, path, type_mismatch(NodeKind::Array, payload));
                };
                if items.len() != elements.len() {
                    let kind = MismatchKind::LengthMismatch {
                        expected: items.len(),
                        found: elements.len(),
                    };
                    return fail(state, path, kind);
                }
                match self.options.arrays {
                    ArrayPolicy::Ordered => self.visit_ordered(elements, items, path, state),
                    ArrayPolicy::Unordered => self.visit_unordered(elements, items, path, state),
                }
            }
            Pattern::Regex(regex) => {
                let Value::String(text) = payload else {
                    return fail(state, path, type_mismatch(NodeKind::String, payload));
                };
                match regex.named_captures(text) {
                    Some(groups) => {
                        state.total += 1;
                        state.groups.extend(groups);
                        Some(Value::String(text.clone()))
                    }
                    None => fail(state, path, MismatchKind::RegexNoMatch),
                }
            }
            Pattern::Null | Pattern::Bool(_) | Pattern::Number(_) | Pattern::String(_) => {
                if literal_eq(pattern, payload) {
                    state.total += 1;
                    pattern.as_literal()
                } else if pattern.kind() == NodeKind::of(payload) {
                    fail(state, path, MismatchKind::NotEqual)
                } else {
                    fail(state, path, type_mismatch(pattern.kind(), payload))
                }
            }
        }
    }

    fn visit_ordered(
        &self,
        elements: &[Value],
        items: &[Pattern],
        path: &PathChain<'_>,
        state: &mut State,
    ) -> Option<Value> {
        let mut out = Vec::with_capacity(items.len());
        for (index, (item, element)) in items.iter().zip(elements).enumerate() {
            if let Some(matched) = self.visit(element, item, &path.index(index), state) {
                out.push(matched);
            }
            if state.failed() {
                break;
            }
        }
        Some(Value::Array(out))
    }

    /// Pairs up pattern elements with payload elements so that as many pattern elements as possible get a
    /// partner. A pattern element is only matched against a payload element when the pairing needs to know
    /// whether they fit, so a payload in pattern order costs one trial per element. Only the trials of the chosen
    /// pairs are committed to `state`.
    fn visit_unordered(
        &self,
        elements: &[Value],
        items: &[Pattern],
        path: &PathChain<'_>,
        state: &mut State,
    ) -> Option<Value> {
        let mut trials = Trials {
            matcher: self,
            elements,
            items,
            path,
            cache: (0..items.len()).map(|_| (0..elements.len()).map(|_| None).collect()).collect(),
        };
        let partners = pair_up(items.len(), |row, column| trials.fits(row, column));

        let mut out = Vec::with_capacity(items.len());
        for (index, partner) in partners.into_iter().enumerate() {
            match partner.and_then(|j| trials.take(index, j)) {
                Some(trial) => {
                    state.total += trial.total;
                    state.groups.extend(trial.groups);
                    out.push(trial.value);
                }
                None => {
                    fail(state, &path.index(index), MismatchKind::NoCounterpart);
                    break;
                }
            }
        }
        Some(Value::Array(out))
    }
}

/// The results of matching single pattern elements (rows) against single payload elements (columns), computed
/// on first use.
struct Trials<'a> {
    matcher: &'a Matcher,
    elements: &'a [Value],
    items: &'a [Pattern],
    path: &'a PathChain<'a>,
    /// `None` if not tried yet, `Some(None)` if the pair does not match
    cache: Vec<Vec<Option<Option<Trial>>>>,
}

impl Trials<'_> {
    fn fits(&mut self, row: usize, column: usize) -> bool {
        if self.cache[row][column].is_none() {
            let trial = self.run(row, column);
            self.cache[row][column] = Some(trial);
        }
        matches!(self.cache[row][column], Some(Some(_)))
    }

    fn run(&self, row: usize, column: usize) -> Option<Trial> {
        let path = self.path.index(row);
        let mut trial = State::trial();
        let value = self
            .matcher
            .visit(&self.elements[column], &self.items[row], &path, &mut trial);
        if trial.failed() {
            return None;
        }
        value.map(|value| Trial {
            value,
            total: trial.total,
            groups: trial.groups,
        })
    }

    fn take(&mut self, row: usize, column: usize) -> Option<Trial> {
        self.cache[row][column].take().flatten()
    }
}

/// Records a mismatch. A mismatch counts as one comparison.
///
/// Always returns `None`, so that it can be used as the result of [`Matcher::visit`].
fn fail(state: &mut State, path: &PathChain<'_>, kind: MismatchKind) -> Option<Value> {
    state.total += 1;
    if !state.trial {
        tracing::trace!(path = %path, reason = %kind, "mismatch");
    }
    state.mismatch = Some(Mismatch {
        path: path.to_pointer(),
        kind,
    });
    None
}

fn type_mismatch(expected: NodeKind, payload: &Value) -> MismatchKind {
    MismatchKind::TypeMismatch {
        expected,
        found: NodeKind::of(payload),
    }
}

fn literal_eq(pattern: &Pattern, payload: &Value) -> bool {
    match (pattern, payload) {
        (Pattern::Null, Value::Null) => true,
        (Pattern::Bool(a), Value::Bool(b)) => a == b,
        (Pattern::Number(a), Value::Number(b)) => numbers_eq(a, b),
        (Pattern::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

/// Maximum bipartite matching between `n` pattern elements (rows) and `n` payload elements (columns) with
/// augmenting paths. Every row tries its own index first, so that a payload in the same order pairs up
/// positionally. `fits` is only asked about pairs that the search actually reaches.
///
/// Returns the chosen column for every row.
fn pair_up(n: usize, mut fits: impl FnMut(usize, usize) -> bool) -> Vec<Option<usize>> {
    let mut owner: Vec<Option<usize>> = vec![None; n];
    for row in 0..n {
        let mut seen = vec![false; n];
        augment(row, &mut fits, &mut seen, &mut owner);
    }
    let mut partners = vec![None; n];
    for (column, row) in owner.into_iter().enumerate() {
        if let Some(row) = row {
            partners[row] = Some(column);
        }
    }
    partners
}

fn augment(
    row: usize,
    fits: &mut impl FnMut(usize, usize) -> bool,
    seen: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    let n = owner.len();
    let candidates = std::iter::once(row).chain((0..n).filter(|&column| column != row));
    for column in candidates {
        if seen[column] || !fits(row, column) {
            continue;
        }
        seen[column] = true;
        let free = match owner[column] {
            None => true,
            Some(other) => augment(other, fits, seen, owner),
        };
        if free {
            owner[column] = Some(row);
            return true;
        }
    }
    false
}
