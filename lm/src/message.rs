//! Log messages and message compaction

use std::borrow::Cow;
use std::fmt;

/// Default cap on rendered message length, in characters
pub const DEFAULT_MESSAGE_SIZE_LIMIT: usize = 2000;

/// Text of a log call: either ready, or produced on demand
///
/// A lazy message is only evaluated when the log call actually reaches the
/// point of writing, so a disabled debug level costs nothing.
pub struct Message<'a>(Inner<'a>);

enum Inner<'a> {
    Ready(Cow<'a, str>),
    Lazy(Box<dyn FnOnce() -> String + 'a>),
}

impl<'a> Message<'a> {
    pub fn lazy(producer: impl FnOnce() -> String + 'a) -> Self {
        Self(Inner::Lazy(Box::new(producer)))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self.0, Inner::Lazy(_))
    }

    /// Produce the text, running the producer if there is one
    pub fn resolve(self) -> String {
        match self.0 {
            Inner::Ready(text) => text.into_owned(),
            Inner::Lazy(producer) => producer(),
        }
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Self(Inner::Ready(Cow::Borrowed(text)))
    }
}

impl From<String> for Message<'_> {
    fn from(text: String) -> Self {
        Self(Inner::Ready(Cow::Owned(text)))
    }
}

impl<'a> From<&'a String> for Message<'a> {
    fn from(text: &'a String) -> Self {
        Self(Inner::Ready(Cow::Borrowed(text.as_str())))
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Ready(text) => f.debug_tuple("Message").field(text).finish(),
            Inner::Lazy(_) => f.write_str("Message(<lazy>)"),
        }
    }
}

/// Shorten `msg` to at most `limit` leading characters plus a tail
///
/// Messages within the limit are returned unchanged. Longer ones become the
/// first `limit` characters, `...`, then everything from character index
/// `len - limit` onwards. Below `2 * limit` characters the head and tail
/// overlap and part of the text appears twice.
pub fn compact(msg: &str, limit: usize) -> Cow<'_, str> {
    let len = msg.chars().count();
    if len <= limit {
        return Cow::Borrowed(msg);
    }

    let head_end = byte_offset(msg, limit);
    let tail_start = byte_offset(msg, len - limit);

    let mut out = String::with_capacity(head_end + 3 + (msg.len() - tail_start));
    out.push_str(&msg[..head_end]);
    out.push_str("...");
    out.push_str(&msg[tail_start..]);
    Cow::Owned(out)
}

/// Byte offset of the character at `char_idx`
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}
