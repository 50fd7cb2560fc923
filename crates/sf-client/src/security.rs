//! Injection guards for values placed into SOQL, SOSL and URL paths.
//!
//! Every user-supplied value that ends up inside a query string literal or a
//! URL path segment goes through one of these helpers first.
//!
//! ```rust
//! use forcelink_client::security::{soql, url};
//!
//! let title = soql::escape_string("Reset your password's expiry");
//! let query = format!("SELECT Id FROM Knowledge__kav WHERE Title = '{}'", title);
//! assert!(query.contains("password\\'s"));
//!
//! assert_eq!(url::encode_param("a/b"), "a%2Fb");
//! ```

/// SOQL literal escaping and identifier validation.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    ///
    /// Quotes, backslashes, and the newline/carriage-return/tab control
    /// characters are backslash-escaped.
    ///
    /// ```rust
    /// use forcelink_client::security::soql;
    ///
    /// assert_eq!(soql::escape_string("O'Brien & Co."), "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value for a `LIKE` pattern, neutralising the `%` and `_`
    /// wildcards as well.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .chars()
            .fold(String::with_capacity(value.len() + 8), |mut out, ch| {
                match ch {
                    '%' => out.push_str("\\%"),
                    '_' => out.push_str("\\_"),
                    _ => out.push(ch),
                }
                out
            })
    }

    /// Whether `name` is a plausible field API name.
    ///
    /// A letter followed by ASCII letters, digits and underscores, which
    /// covers `__c` custom fields and `__r` relationships.
    ///
    /// ```rust
    /// use forcelink_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("UrlName"));
    /// assert!(soql::is_safe_field_name("Product_Line__c"));
    /// assert!(!soql::is_safe_field_name("Title' OR Id != '"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// Whether `name` is a plausible sObject API name such as `Knowledge__kav`.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }

    /// Keep only the safe field names.
    pub fn filter_safe_fields<'a>(
        fields: impl IntoIterator<Item = &'a str>,
    ) -> impl Iterator<Item = &'a str> {
        fields.into_iter().filter(|f| is_safe_field_name(f))
    }

    /// Join the safe field names with `", "`, or `None` if none survive.
    #[must_use]
    pub fn build_safe_select(fields: &[&str]) -> Option<String> {
        let safe: Vec<_> = filter_safe_fields(fields.iter().copied()).collect();
        (!safe.is_empty()).then(|| safe.join(", "))
    }
}

/// SOSL search-term escaping.
pub mod sosl {
    const RESERVED: &[char] = &[
        '?', '&', '|', '!', '{', '}', '[', ']', '(', ')', '^', '~', '*', ':', '\\', '"', '\'',
        '+', '-',
    ];

    /// Escape the SOSL reserved characters in a search term so it can sit
    /// inside `FIND {...}`.
    ///
    /// ```rust
    /// use forcelink_client::security::sosl;
    ///
    /// assert_eq!(sosl::escape_search_term("C++ {draft}"), "C\\+\\+ \\{draft\\}");
    /// ```
    #[must_use]
    pub fn escape_search_term(term: &str) -> String {
        let mut escaped = String::with_capacity(term.len() + 8);
        for ch in term.chars() {
            if RESERVED.contains(&ch) {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped
    }
}

/// URL path helpers.
pub mod url {
    /// Percent-encode a value for use as a single path segment.
    ///
    /// ```rust
    /// use forcelink_client::security::url;
    ///
    /// assert_eq!(url::encode_param("001/../../secret"), "001%2F..%2F..%2Fsecret");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Whether `id` has the shape of a record ID: 15 or 18 ASCII alphanumerics.
    ///
    /// This is a URL-safety check only. It does not verify the checksum
    /// suffix; see [`crate::id`] for normalization.
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        matches!(id.len(), 15 | 18) && id.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// `sobjects/{sobject}/{id}`, or `None` if either part fails validation.
    ///
    /// ```rust
    /// use forcelink_client::security::url;
    ///
    /// assert_eq!(
    ///     url::sobject_path("Knowledge__kav", "ka4PO0000002hby"),
    ///     Some("sobjects/Knowledge__kav/ka4PO0000002hby".to_string())
    /// );
    /// assert_eq!(url::sobject_path("Knowledge__kav", "../limits"), None);
    /// ```
    #[must_use]
    pub fn sobject_path(sobject: &str, id: &str) -> Option<String> {
        if !super::soql::is_safe_sobject_name(sobject) || !is_valid_salesforce_id(id) {
            return None;
        }
        Some(format!("sobjects/{}/{}", sobject, id))
    }
}
