use std::fmt;

use crate::crash::constants::{aggregated_inner_exception_label, INNER_EXCEPTION_LABEL};
use crate::crash::stack_trace::{parse_text, StackFrame};

/// Fully-qualified exception type name split into namespace and simple name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeName {
    namespace: Option<String>,
    name: String,
}

impl TypeName {
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
            name: name.into(),
        }
    }

    /// Splits `NS.Sub.Type` into `NS.Sub` and `Type`.
    ///
    /// Only dots before the first nested-type (`+`), generic arity (`` ` ``) or
    /// type-argument (`[`) marker separate namespace segments, so
    /// ``NS.Outer+Inner`` and ``System.Collections.Generic.List`1[System.Int32]``
    /// keep their full simple names.
    pub fn parse(qualified: &str) -> Self {
        let qualified = qualified.trim();
        let boundary = qualified
            .find(['+', '`', '['])
            .unwrap_or(qualified.len());
        match qualified[..boundary].rfind('.') {
            Some(dot) if dot > 0 => Self::new(Some(&qualified[..dot]), &qualified[dot + 1..]),
            _ => Self::new(None, qualified),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        TypeName::parse(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        TypeName::parse(&value)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// What an exception wraps, if anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Cause {
    #[default]
    None,
    /// A single, linear inner exception.
    Inner(Box<ExceptionInfo>),
    /// Several exceptions raised together (e.g. by parallel work).
    Aggregated(Vec<ExceptionInfo>),
}

/// Runtime-independent description of a thrown exception and its causes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionInfo {
    type_name: TypeName,
    message: String,
    stack_trace: Option<String>,
    cause: Cause,
}

impl ExceptionInfo {
    pub fn new(type_name: impl Into<TypeName>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack_trace: None,
            cause: Cause::None,
        }
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Sets a single inner exception, replacing any previous cause.
    pub fn with_inner_exception(mut self, inner: ExceptionInfo) -> Self {
        self.cause = Cause::Inner(Box::new(inner));
        self
    }

    /// Marks this exception as an aggregate of `inner`, replacing any previous cause.
    pub fn with_inner_exceptions<I>(mut self, inner: I) -> Self
    where
        I: IntoIterator<Item = ExceptionInfo>,
    {
        self.cause = Cause::Aggregated(inner.into_iter().collect());
        self
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Flattens this exception and all of its causes into frames.
    pub fn frames(&self) -> Vec<StackFrame> {
        parse_exception(self)
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for ExceptionInfo {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Cause::Inner(inner) => Some(&**inner),
            Cause::Aggregated(inner) => inner.first().map(|e| e as &(dyn std::error::Error + 'static)),
            Cause::None => None,
        }
    }
}

/// Numbers aggregated inner exceptions across one whole walk.
#[derive(Debug, Default)]
struct InnerExceptionCounter {
    next: usize,
}

impl InnerExceptionCounter {
    fn advance(&mut self) -> usize {
        let current = self.next;
        self.next += 1;
        current
    }
}

/// Flattens an exception chain into frames, depth first.
///
/// The output holds the exception's own frames, then for every cause one
/// separator frame followed by that cause's expansion. `None` yields no frames.
pub fn parse_exception<'a>(exception: impl Into<Option<&'a ExceptionInfo>>) -> Vec<StackFrame> {
    let mut frames = Vec::new();
    if let Some(exception) = exception.into() {
        let mut counter = InnerExceptionCounter::default();
        collect_frames(exception, &mut counter, &mut frames);
    }
    frames
}

fn collect_frames(
    exception: &ExceptionInfo,
    counter: &mut InnerExceptionCounter,
    frames: &mut Vec<StackFrame>,
) {
    frames.extend(parse_text(exception.stack_trace()));

    match &exception.cause {
        Cause::None => {}
        Cause::Inner(inner) => {
            frames.push(separator_frame(INNER_EXCEPTION_LABEL, inner));
            collect_frames(inner, counter, frames);
        }
        Cause::Aggregated(inner_exceptions) => {
            for inner in inner_exceptions {
                let label = aggregated_inner_exception_label(counter.advance());
                frames.push(separator_frame(&label, inner));
                collect_frames(inner, counter, frames);
            }
        }
    }
}

fn separator_frame(label: &str, cause: &ExceptionInfo) -> StackFrame {
    let name = cause.type_name.name();
    match cause.type_name.namespace() {
        Some(namespace) => StackFrame::separator(
            format!("{label} {namespace}"),
            format!("{name}: {}", cause.message),
        ),
        None => StackFrame::separator(format!("{label} {name}: {}", cause.message), ""),
    }
}
