// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The error returned by every fallible sketch operation.
//!
//! Errors here are usage errors: a bad table shape, a negative weight, or a call to an
//! operation the sketch does not offer. None of them are transient, so nothing is retried.

use std::fmt;

/// Why an operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A sketch could not be built from the requested width, depth, capacity or error
    /// bounds.
    InvalidConfig,
    /// A call received a value it cannot apply, such as a negative weight.
    InvalidArgument,
    /// The sketch does not implement the requested operation.
    Unsupported,
}

impl ErrorKind {
    /// Returns the name of the kind, as used in formatted errors.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidConfig => "InvalidConfig",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into_static())
    }
}

/// A refused sketch operation.
///
/// Carries an [`ErrorKind`], a human-readable message, and `key: value` pairs naming the
/// offending inputs. The sketch is left unchanged whenever one of these is returned.
///
/// # Examples
///
/// ```
/// # use freqsketch::error::Error;
/// # use freqsketch::error::ErrorKind;
/// let err = Error::new(ErrorKind::InvalidConfig, "width must be positive")
///     .with_context("width", 0);
/// assert_eq!(err.kind(), ErrorKind::InvalidConfig);
/// assert_eq!(err.message(), "width must be positive");
/// assert_eq!(err.to_string(), "InvalidConfig, context: { width: 0 } => width must be positive");
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Creates an error of `kind` with no context attached.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Records an input value under `key`.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the attached `key: value` pairs, oldest first.
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }
}

impl Error {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig, msg)
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, msg)
    }

    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::new(
            ErrorKind::Unsupported,
            format!("{operation} is not implemented"),
        )
    }

    pub(crate) fn non_positive(name: &'static str, value: impl fmt::Display) -> Self {
        Self::invalid_config(format!("{name} must be positive, got {value}"))
    }

    fn write_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message.as_str() {
            "" => Ok(()),
            message => write!(f, " => {message}"),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:#?}` shows the raw fields.
        if f.alternate() {
            return f
                .debug_struct("Error")
                .field("kind", &self.kind)
                .field("message", &self.message)
                .field("context", &self.context)
                .finish();
        }

        // One line for the failure, then the context as an indented list.
        write!(f, "{}", self.kind)?;
        self.write_message(f)?;
        writeln!(f)?;
        if self.context.is_empty() {
            return Ok(());
        }
        writeln!(f, "\nContext:")?;
        for (key, value) in &self.context {
            writeln!(f, "   {key}: {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(((first_key, first_value), rest)) = self.context.split_first() {
            write!(f, ", context: {{ {first_key}: {first_value}")?;
            for (key, value) in rest {
                write!(f, ", {key}: {value}")?;
            }
            write!(f, " }}")?;
        }
        self.write_message(f)
    }
}

impl std::error::Error for Error {}
