use std::fmt::{self, Write};

/// One step from a node to one of its children.
#[derive(Clone, Copy)]
pub(crate) enum Segment<'p> {
    Root,
    Key(&'p str),
    Index(usize),
}

/// The position of the node that is currently being matched, as a chain of borrowed segments on the stack.
///
/// Building the chain costs nothing. It is only turned into a string when a mismatch is recorded or a trace
/// event is actually emitted.
#[derive(Clone, Copy)]
pub(crate) struct PathChain<'p> {
    current: Segment<'p>,
    parent: Option<&'p PathChain<'p>>,
}

impl<'p> PathChain<'p> {
    pub(crate) fn root() -> Self {
        Self {
            current: Segment::Root,
            parent: None,
        }
    }
    pub(crate) fn key(&'p self, key: &'p str) -> Self {
        self.and(Segment::Key(key))
    }
    pub(crate) fn index(&'p self, index: usize) -> Self {
        self.and(Segment::Index(index))
    }
    fn and(&'p self, child: Segment<'p>) -> Self {
        Self {
            current: child,
            parent: Some(self),
        }
    }

    /// The path as a JSON pointer (RFC 6901). The root is the empty string.
    pub(crate) fn to_pointer(&self) -> String {
        let mut out = String::new();
        self.append_to(&mut out);
        out
    }
    fn append_to(&self, out: &mut String) {
        if let Some(parent) = &self.parent {
            parent.append_to(out);
        }
        match self.current {
            Segment::Root => {}
            Segment::Key(key) => {
                out.push('/');
                for c in key.chars() {
                    match c {
                        '~' => out.push_str("~0"),
                        '/' => out.push_str("~1"),
                        c => out.push(c),
                    }
                }
            }
            Segment::Index(index) => {
                // writing to a String can't fail
                let _ = write!(out, "/{}", index);
            }
        }
    }
}

impl fmt::Display for PathChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}
