use regex::Regex;
use std::fmt;

const ANY: &str = "*";
const REGEX_PREFIX: &str = "regex:";

/// Name filter for types, members or parameters.
///
/// `*` and `?` are wildcards; a `regex:` prefix takes the rest as a regular
/// expression. Both forms must match the whole name.
#[derive(Clone)]
pub struct NamePattern {
    source: String,
    regex: Option<Regex>,
}

impl NamePattern {
    pub fn any() -> Self {
        Self {
            source: ANY.to_string(),
            regex: None,
        }
    }

    pub fn parse(source: &str) -> Result<Self, String> {
        if source.is_empty() {
            return Err("pattern is empty".to_string());
        }
        if source == ANY {
            return Ok(Self::any());
        }

        let expression = match source.strip_prefix(REGEX_PREFIX) {
            Some(expression) if expression.is_empty() => {
                return Err("regular expression is empty".to_string())
            }
            Some(expression) => expression.to_string(),
            None => wildcard_to_regex(source),
        };

        let regex = Regex::new(&format!("^(?:{expression})$")).map_err(|e| e.to_string())?;
        Ok(Self {
            source: source.to_string(),
            regex: Some(regex),
        })
    }

    pub fn is_any(&self) -> bool {
        self.regex.is_none()
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(name),
            None => true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut expression = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars() {
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            _ => expression.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    expression
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::any()
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamePattern").field(&self.source).finish()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
