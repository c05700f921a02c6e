/// How a type's member names are tokenized into words and formatted back.
///
/// Conventions drive the split-matching step of member search: a destination
/// name is tokenized with the destination convention and candidate chains
/// are re-joined with the source convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// No tokenization; names match verbatim only
    Exact,
    /// Words begin at uppercase letters, e.g. `DepartmentName`
    PascalCase,
    /// Lowercase words delimited by a separator, e.g. `department_name`
    LowerSeparated(char),
}

impl NamingConvention {
    pub fn snake_case() -> NamingConvention {
        NamingConvention::LowerSeparated('_')
    }

    /// The convention assumed when a profile sets none
    pub fn is_default(self) -> bool {
        matches!(self, NamingConvention::PascalCase)
    }

    /// Tokenizes `name` into ordered words. Always yields at least one
    /// token; an empty name yields one empty token.
    pub fn split(self, name: &str) -> Vec<String> {
        let mut tokens = match self {
            NamingConvention::Exact => vec![name.to_string()],
            NamingConvention::PascalCase => split_pascal(name),
            NamingConvention::LowerSeparated(sep) => name
                .split(sep)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        };
        if tokens.is_empty() {
            tokens.push(String::new());
        }
        tokens
    }

    /// Formats word tokens back into a single member name
    pub fn join(self, tokens: &[String]) -> String {
        match self {
            NamingConvention::Exact => tokens.concat(),
            NamingConvention::PascalCase => tokens.iter().map(|t| capitalize(t)).collect(),
            NamingConvention::LowerSeparated(sep) => tokens
                .iter()
                .map(|token| token.to_lowercase())
                .collect::<Vec<_>>()
                .join(&sep.to_string()),
        }
    }
}

fn split_pascal(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = vec![];
    let mut start = 0;

    for i in 1..chars.len() {
        if pascal_boundary(&chars, i) {
            tokens.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    if start < chars.len() {
        tokens.push(chars[start..].iter().collect());
    }
    tokens
}

/// A word starts at an uppercase letter preceded by a lowercase letter or
/// digit, or at the last uppercase letter of a run when a lowercase letter
/// follows (`HTMLParser` splits before `Parser`)
fn pascal_boundary(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if !c.is_uppercase() {
        return false;
    }
    let prev = chars[i - 1];
    if prev.is_lowercase() || prev.is_numeric() {
        return true;
    }
    prev.is_uppercase() && matches!(chars.get(i + 1), Some(next) if next.is_lowercase())
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
