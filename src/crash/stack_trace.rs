use std::fmt;
use std::iter::FusedIterator;
use std::str::Lines;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::crash::constants::UNKNOWN_FILE_NAME;

/// One line of a managed stack trace, e.g.
/// `  at NS.Type.Method (System.String arg) [0x00012] in /src/File.cs:42`.
///
/// The `in <file>:<line>` suffix is optional and everything between the
/// argument list and the suffix is treated as an opaque offset.
static FRAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*at (?P<class_name>\S+)\.(?P<method_name>\S+ ?\(.*\))(?:\s+(?P<offset>.*?))??(?: in (?P<file_name>.+):(?P<line_number>\d+))?\s*$",
    )
    .expect("stack frame pattern must compile")
});

/// A single call site extracted from a textual stack trace.
///
/// A file name other than [`UNKNOWN_FILE_NAME`] is only kept together with a
/// line number above zero. Separator frames are the one exception: they carry
/// an empty file name and line `0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StackFrameRecord")]
pub struct StackFrame {
    class_name: String,
    method_name: String,
    file_name: String,
    line_number: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StackFrameRecord {
    class_name: String,
    method_name: String,
    file_name: String,
    line_number: u32,
}

impl From<StackFrameRecord> for StackFrame {
    fn from(record: StackFrameRecord) -> Self {
        StackFrame::new(
            record.class_name,
            record.method_name,
            record.file_name,
            record.line_number,
        )
    }
}

impl StackFrame {
    /// Builds a frame. With line `0` a non-empty `file_name` is replaced by
    /// [`UNKNOWN_FILE_NAME`]; an empty one is kept for separator frames.
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        file_name: impl Into<String>,
        line_number: u32,
    ) -> Self {
        let mut file_name = file_name.into();
        if line_number == 0 && !file_name.is_empty() && file_name != UNKNOWN_FILE_NAME {
            file_name = UNKNOWN_FILE_NAME.to_string();
        }
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            file_name,
            line_number,
        }
    }

    /// Builds the synthetic frame that marks the start of a nested cause.
    pub fn separator(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self::new(class_name, method_name, String::new(), 0)
    }

    /// Returns `true` for frames built by [`StackFrame::separator`].
    pub fn is_separator(&self) -> bool {
        self.line_number == 0 && self.file_name.is_empty()
    }

    /// Builds a frame whose location could not be determined.
    pub fn unknown_location(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self::new(class_name, method_name, UNKNOWN_FILE_NAME, 0)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Returns `true` when the frame points at a real source location.
    pub fn has_location(&self) -> bool {
        self.line_number > 0
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.method_name.is_empty() {
            write!(f, "at {}", self.class_name)?;
        } else {
            write!(f, "at {}.{}", self.class_name, self.method_name)?;
        }
        if self.has_location() {
            write!(f, " in {}:{}", self.file_name, self.line_number)?;
        }
        Ok(())
    }
}

/// Lazily parses the frames of a stack trace, one line at a time.
///
/// Lines that do not look like a frame are skipped. Every call to
/// [`parse_text`] starts over from the first line.
#[derive(Clone, Debug)]
pub struct StackFrames<'a> {
    lines: Lines<'a>,
}

impl Iterator for StackFrames<'_> {
    type Item = StackFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(parse_line)
    }
}

impl FusedIterator for StackFrames<'_> {}

/// Borrowed stack-trace text accepted by [`parse_text`].
pub trait IntoStackTraceText<'a> {
    fn into_stack_trace_text(self) -> Option<&'a str>;
}

impl<'a> IntoStackTraceText<'a> for &'a str {
    fn into_stack_trace_text(self) -> Option<&'a str> {
        Some(self)
    }
}

impl<'a> IntoStackTraceText<'a> for &'a String {
    fn into_stack_trace_text(self) -> Option<&'a str> {
        Some(self.as_str())
    }
}

impl<'a> IntoStackTraceText<'a> for Option<&'a str> {
    fn into_stack_trace_text(self) -> Option<&'a str> {
        self
    }
}

impl<'a> IntoStackTraceText<'a> for Option<&'a String> {
    fn into_stack_trace_text(self) -> Option<&'a str> {
        self.map(String::as_str)
    }
}

/// Parses a raw, multi-line stack trace into frames.
///
/// `None` and the empty string both produce an empty sequence.
pub fn parse_text<'a>(text: impl IntoStackTraceText<'a>) -> StackFrames<'a> {
    StackFrames {
        lines: text.into_stack_trace_text().unwrap_or_default().lines(),
    }
}

/// Parses a single stack-trace line, returning `None` when it is not a frame.
pub fn parse_line(line: &str) -> Option<StackFrame> {
    FRAME_PATTERN.captures(line).map(|captures| frame_from_captures(&captures))
}

fn frame_from_captures(captures: &Captures<'_>) -> StackFrame {
    let class_name = &captures["class_name"];
    let method_name = &captures["method_name"];

    let line_number = match captures.name("line_number") {
        Some(digits) => match digits.as_str().parse::<u32>() {
            Ok(line) => line,
            Err(err) => {
                log::warn!(
                    "ignoring line number {} for {class_name}.{method_name}: {err}",
                    digits.as_str()
                );
                0
            }
        },
        None => 0,
    };

    match captures.name("file_name") {
        Some(file_name) if line_number > 0 => {
            StackFrame::new(class_name, method_name, file_name.as_str(), line_number)
        }
        _ => StackFrame::unknown_location(class_name, method_name),
    }
}
