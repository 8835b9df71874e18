// src/caching/key.rs
//
// Cache key grammar:
//
//     <prefix>_<operation>[_admin][_<id>][_page_<n>][_status_code]
//
// The prefix itself may contain underscores (`product_type`), so parsing
// anchors on the literal operation segment rather than splitting naively.

use regex::Regex;

pub const STATUS_CODE_SUFFIX: &str = "_status_code";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Retrieve,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Retrieve => "retrieve",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Operation::List),
            "retrieve" => Some(Operation::Retrieve),
            _ => None,
        }
    }
}

/// Builder for canonical cache keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    prefix: String,
    operation: Operation,
    admin: bool,
    pk: Option<u64>,
    page: Option<u32>,
}

impl CacheKey {
    pub fn new(prefix: impl Into<String>, operation: Operation) -> Self {
        Self {
            prefix: prefix.into(),
            operation,
            admin: false,
            pk: None,
            page: None,
        }
    }

    /// Admin responses expose more fields, so they cache under their own key.
    pub fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn pk(mut self, pk: u64) -> Self {
        self.pk = Some(pk);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Canonical string form of the key.
    pub fn render(&self) -> String {
        let mut key = format!("{}_{}", self.prefix, self.operation.as_str());
        if self.admin {
            key.push_str("_admin");
        }
        if let Some(pk) = self.pk {
            key.push_str(&format!("_{}", pk));
        }
        if let Some(page) = self.page {
            key.push_str(&format!("_page_{}", page));
        }
        key
    }

    /// Key of the paired status-code entry.
    pub fn status_key(&self) -> String {
        format!("{}{}", self.render(), STATUS_CODE_SUFFIX)
    }
}

/// A key decomposed back into its grammar segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub prefix: String,
    pub operation: Operation,
    pub admin: bool,
    pub pk: Option<u64>,
    pub page: Option<u32>,
    /// Whether this is the status-code twin of a data entry.
    pub status_code: bool,
}

/// Compiled parser for the key grammar; build once per sweep.
pub struct KeyGrammar {
    pattern: Regex,
}

impl KeyGrammar {
    pub fn new() -> Self {
        // lazy prefix so `product_type_list` parses as prefix `product_type`
        let pattern = Regex::new(
            r"^(?P<prefix>[a-zA-Z0-9_]+?)_(?P<operation>list|retrieve)(?P<admin>_admin)?(?:_(?P<pk>\d+))?(?:_page_(?P<page>\d+))?(?P<status>_status_code)?$",
        )
        .expect("cache key grammar compiles");
        Self { pattern }
    }

    /// Parses a key; `None` means the key does not follow the grammar.
    pub fn parse(&self, key: &str) -> Option<ParsedKey> {
        let captures = self.pattern.captures(key)?;
        let operation = Operation::parse(captures.name("operation")?.as_str())?;
        let pk = match captures.name("pk") {
            Some(pk) => Some(pk.as_str().parse::<u64>().ok()?),
            None => None,
        };
        let page = match captures.name("page") {
            Some(page) => Some(page.as_str().parse::<u32>().ok()?),
            None => None,
        };
        Some(ParsedKey {
            prefix: captures.name("prefix")?.as_str().to_string(),
            operation,
            admin: captures.name("admin").is_some(),
            pk,
            page,
            status_code: captures.name("status").is_some(),
        })
    }
}

impl Default for KeyGrammar {
    fn default() -> Self {
        Self::new()
    }
}
