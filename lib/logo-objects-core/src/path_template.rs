//! Path templates with `{placeholder}` segments.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Encodes everything that would break out of a single path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// A path template such as `/{id}/ApplyCampaign/{campaignCode}`.
///
/// Route tables keep the template so logging can report the operation shape
/// rather than the resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder names in order of appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.0;
        while let Some((_, after)) = rest.split_once('{') {
            let Some((name, tail)) = after.split_once('}') else {
                break;
            };
            names.push(name);
            rest = tail;
        }
        names
    }

    /// Substitute every placeholder with its percent-encoded value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPathParameter`] if a placeholder has no value,
    /// and [`Error::InvalidRequest`] for a value of `.` or `..`, which URL
    /// resolution would turn into a different path.
    pub fn render<K, V>(&self, params: &[(K, V)]) -> Result<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut path = String::with_capacity(self.0.len());
        let mut rest = self.0;
        while let Some((before, after)) = rest.split_once('{') {
            let Some((name, tail)) = after.split_once('}') else {
                break;
            };
            let value = params
                .iter()
                .find(|(key, _)| key.as_ref() == name)
                .map(|(_, value)| value.as_ref())
                .ok_or_else(|| Error::MissingPathParameter {
                    template: self.0,
                    name: name.to_string(),
                })?;
            if matches!(value, "." | "..") {
                return Err(Error::invalid_request(format!(
                    "path parameter {name} cannot be {value:?}"
                )));
            }
            path.push_str(before);
            path.extend(utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET));
            rest = tail;
        }
        path.push_str(rest);
        Ok(path)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}
