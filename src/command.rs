//! The command record (component C2): an immutable `(name, arguments)` pair that the batch
//! builder appends to and the transport eventually serializes.

use std::borrow::Cow;

use crate::value::BinaryStringValue;

/// How a command's arguments ended up being stored. This only matters for introspection and
/// golden-vector tests; both variants serialize identically (length-prefixed byte strings).
#[derive(Clone, Debug, PartialEq, Eq)]
enum CmdArgs {
    /// Every argument was text-convertible; stored as plain `String`s.
    Text(Vec<String>),
    /// At least one argument was not text-convertible; the whole argument vector is carried as
    /// raw bytes so a non-text payload is never forced through a text encoding.
    Binary(Vec<BinaryStringValue>),
}

/// An immutable `(name, ordered arguments)` command record.
///
/// `Cmd` never corrupts a non-text-convertible argument: [`Cmd::from_parts`] is the single
/// decision point that chooses between the text and binary storage forms, and every builder
/// method in [`crate::batch`] routes its arguments through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cmd {
    name: Cow<'static, str>,
    args: CmdArgs,
}

impl Cmd {
    /// Assembles a command from a name and an ordered list of argument parts, choosing a text or
    /// binary encoding so that no byte of a non-text-convertible part is lost.
    ///
    /// If every part is text-convertible the command is stored as a text command; otherwise the
    /// whole argument vector (including parts that are themselves text) is stored as raw bytes.
    /// This mirrors the source behavior: binary-safety is a property of the *command*, not of
    /// individual arguments, because the two storage forms must collapse to one wire form.
    pub fn from_parts(name: impl Into<Cow<'static, str>>, parts: Vec<BinaryStringValue>) -> Self {
        let name = name.into();
        if parts.iter().all(BinaryStringValue::is_text_convertible) {
            let args = parts
                .iter()
                .map(|p| p.as_text().expect("checked text_convertible above").to_owned())
                .collect();
            Cmd {
                name,
                args: CmdArgs::Text(args),
            }
        } else {
            Cmd {
                name,
                args: CmdArgs::Binary(parts),
            }
        }
    }

    /// Starts a binary command with no arguments yet; callers append with
    /// [`Cmd::add_argument`]. Used by operations (like `RESTORE`) that must guarantee a binary
    /// encoding regardless of whether any individual argument happens to be text.
    pub fn new_binary(name: impl Into<Cow<'static, str>>) -> Self {
        Cmd {
            name: name.into(),
            args: CmdArgs::Binary(Vec::new()),
        }
    }

    /// Appends one argument to a binary command. Panics (a programmer error, caught by tests) if
    /// called on a command built with [`Cmd::from_parts`] that happened to collapse to the text
    /// form -- callers that need guaranteed binary storage must start from
    /// [`Cmd::new_binary`].
    pub fn add_argument(&mut self, arg: impl Into<BinaryStringValue>) -> &mut Self {
        match &mut self.args {
            CmdArgs::Binary(args) => args.push(arg.into()),
            CmdArgs::Text(_) => {
                unreachable!("add_argument requires a command started with Cmd::new_binary")
            }
        }
        self
    }

    /// The command's name, e.g. `"GET"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this command's arguments are stored as raw bytes rather than text.
    pub fn is_binary(&self) -> bool {
        matches!(self.args, CmdArgs::Binary(_))
    }

    /// The number of arguments (not counting the command name).
    pub fn arity(&self) -> usize {
        match &self.args {
            CmdArgs::Text(v) => v.len(),
            CmdArgs::Binary(v) => v.len(),
        }
    }

    /// A read-only byte-slice view of the arguments, in order. Used by the transport to build
    /// the wire request and by tests to assert argument vectors token-by-token.
    pub fn arguments(&self) -> Vec<&[u8]> {
        match &self.args {
            CmdArgs::Text(v) => v.iter().map(|s| s.as_bytes()).collect(),
            CmdArgs::Binary(v) => v.iter().map(BinaryStringValue::as_bytes).collect(),
        }
    }
}

/// Formats a float the way the server's text protocol expects (no trailing `.0` noise beyond
/// what Rust's default float formatting already avoids, and no scientific notation for the
/// ranges these commands deal with).
pub(crate) fn format_float(f: f64) -> String {
    if f == f.trunc() && f.is_finite() && f.abs() < 1e17 {
        format!("{}", f as i64)
    } else {
        format!("{f}")
    }
}

/// Diagnostic-only command classification, checked in debug builds but never exposed as builder
/// API surface: a non-blocking command has no business carrying a timeout argument, and this is
/// the one place that assumption gets verified rather than silently trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct CommandFlags {
    pub(crate) is_blocking: bool,
    pub(crate) is_write: bool,
}

impl CommandFlags {
    pub(crate) const fn new(is_blocking: bool, is_write: bool) -> Self {
        Self { is_blocking, is_write }
    }
}

/// A small fluent helper used throughout [`crate::batch`] to assemble a [`Cmd`]'s argument
/// vector one token at a time before handing it to [`Cmd::from_parts`].
pub(crate) struct ArgBuilder {
    name: &'static str,
    parts: Vec<BinaryStringValue>,
}

impl ArgBuilder {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            parts: Vec::new(),
        }
    }

    /// Asserts, in debug builds only, that a command's blocking classification agrees with
    /// whether it was actually assembled with a timeout argument.
    pub(crate) fn assert_flags(self, flags: CommandFlags, timeout_present: bool) -> Self {
        debug_assert!(
            flags.is_blocking || !timeout_present,
            "`{}` is not flagged as a blocking command but was assembled with a timeout argument",
            self.name
        );
        self
    }

    pub(crate) fn push(mut self, v: impl Into<BinaryStringValue>) -> Self {
        self.parts.push(v.into());
        self
    }

    pub(crate) fn push_opt(mut self, v: Option<impl Into<BinaryStringValue>>) -> Self {
        if let Some(v) = v {
            self.parts.push(v.into());
        }
        self
    }

    pub(crate) fn push_all(mut self, values: impl IntoIterator<Item = impl Into<BinaryStringValue>>) -> Self {
        self.parts.extend(values.into_iter().map(Into::into));
        self
    }

    pub(crate) fn push_token(mut self, token: &'static str) -> Self {
        self.parts.push(BinaryStringValue::from_text(token));
        self
    }

    pub(crate) fn push_token_if(mut self, cond: bool, token: &'static str) -> Self {
        if cond {
            self.parts.push(BinaryStringValue::from_text(token));
        }
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.parts.len()
    }

    pub(crate) fn build(self) -> Cmd {
        Cmd::from_parts(self.name, self.parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_text_parts_collapse_to_text_command() {
        let cmd = ArgBuilder::new("SET").push("k").push("v").build();
        assert!(!cmd.is_binary());
        assert_eq!(cmd.name(), "SET");
        assert_eq!(cmd.arguments(), vec![b"k".as_slice(), b"v".as_slice()]);
    }

    #[test]
    fn one_binary_part_forces_binary_command() {
        let payload = vec![0x00, 0xFF];
        let cmd = ArgBuilder::new("SET")
            .push("k")
            .push(payload.clone())
            .build();
        assert!(cmd.is_binary());
        assert_eq!(cmd.arguments(), vec![b"k".as_slice(), payload.as_slice()]);
    }

    #[test]
    fn new_binary_preserves_bytes_across_mixed_arguments() {
        let mut cmd = Cmd::new_binary("RESTORE");
        cmd.add_argument("key").add_argument(0i64).add_argument(vec![0x00, 0xAB]);
        assert!(cmd.is_binary());
        assert_eq!(cmd.arity(), 3);
    }

    #[test]
    fn assert_flags_accepts_a_blocking_command_with_a_timeout() {
        let cmd = ArgBuilder::new("BLPOP")
            .assert_flags(CommandFlags::new(true, true), true)
            .push("k")
            .push(0i64)
            .build();
        assert_eq!(cmd.name(), "BLPOP");
    }

    #[test]
    #[should_panic(expected = "is not flagged as a blocking command")]
    #[cfg(debug_assertions)]
    fn assert_flags_rejects_a_non_blocking_command_with_a_timeout() {
        ArgBuilder::new("LPUSH").assert_flags(CommandFlags::new(false, true), true);
    }
}
