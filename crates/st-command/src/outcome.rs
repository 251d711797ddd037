//! `CommandOutcome` and the localizable reason attached to it.
//!
//! Messages are sequences of fragments: stable text keys and interpolated
//! values.  Rendering them for a player is someone else's job; `Display`
//! only concatenates fragments so logs stay readable.

use std::borrow::Cow;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Fragment {
    Text(Cow<'static, str>),
    Value(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LocalizableMessage {
    fragments: Vec<Fragment>,
}

impl LocalizableMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(key: impl Into<Cow<'static, str>>) -> Self {
        Self { fragments: vec![Fragment::Text(key.into())] }
    }

    pub fn with_text(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.fragments.push(Fragment::Text(key.into()));
        self
    }

    pub fn with_value(mut self, value: impl fmt::Display) -> Self {
        self.fragments.push(Fragment::Value(value.to_string()));
        self
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn extend(&mut self, other: LocalizableMessage) {
        self.fragments.extend(other.fragments);
    }
}

impl fmt::Display for LocalizableMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match fragment {
                Fragment::Text(t) => f.write_str(t)?,
                Fragment::Value(v) => f.write_str(v)?,
            }
        }
        Ok(())
    }
}

/// Result of a validation hook.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutcome {
    pub success: bool,
    pub reason:  LocalizableMessage,
}

impl CommandOutcome {
    pub fn ok() -> Self {
        Self { success: true, reason: LocalizableMessage::new() }
    }

    pub fn fail(reason: LocalizableMessage) -> Self {
        Self { success: false, reason }
    }

    /// Succeed when `condition` holds, otherwise fail with `reason()`.
    pub fn check(condition: bool, reason: impl FnOnce() -> LocalizableMessage) -> Self {
        if condition { Self::ok() } else { Self::fail(reason()) }
    }

    /// AND of all sub-outcomes.  The reason lists every failing sub-reason,
    /// separated by `;`.  An empty input is a vacuous success.
    pub fn all(outcomes: impl IntoIterator<Item = CommandOutcome>) -> Self {
        let mut combined = Self::ok();
        for outcome in outcomes.into_iter().filter(|o| !o.success) {
            if !combined.reason.is_empty() {
                combined.reason = std::mem::take(&mut combined.reason).with_text(";");
            }
            combined.success = false;
            combined.reason.extend(outcome.reason);
        }
        combined
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            f.write_str("ok")
        } else {
            write!(f, "rejected: {}", self.reason)
        }
    }
}
