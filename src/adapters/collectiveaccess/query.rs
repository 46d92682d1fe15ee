//! GraphQL query text for the CollectiveAccess services
//!
//! The services take a single query string with values spliced in; there are
//! no variables. Every interpolated value goes through [`string_literal`] or
//! [`bundle_list_literal`], which emit JSON literals. A JSON string literal is
//! also a valid GraphQL string literal, so quotes, backslashes and control
//! characters in a search term, username or password cannot end the literal
//! early.

use crate::domain::search::{SearchRequest, OBJECTS_TABLE};
use serde_json::Value;

/// Login endpoint, relative to the base URL
pub const AUTH_ENDPOINT: &str = "/service/Auth";

/// Search endpoint, relative to the base URL
pub const SEARCH_ENDPOINT: &str = "/service/Search";

/// Selection set requested for every search
const SEARCH_SELECTION: &str = "{ table, count, results { result { id, table, idno, bundles { name, code, dataType, values { value, locale } } } } }";

/// Quote and escape a value as a GraphQL string literal
///
/// ```
/// use cafetch::adapters::collectiveaccess::query::string_literal;
///
/// assert_eq!(string_literal(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
pub fn string_literal(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Encode bundle identifiers as a list literal, order preserved
pub fn bundle_list_literal(bundles: &[String]) -> String {
    Value::Array(bundles.iter().cloned().map(Value::String).collect()).to_string()
}

/// Query for `/service/Auth`
pub fn login_query(username: &str, password: &str) -> String {
    format!(
        "{{ login(username: {}, password: {}) {{ jwt }} }}",
        string_literal(username),
        string_literal(password),
    )
}

/// Query for `/service/Search`
pub fn search_query(request: &SearchRequest) -> String {
    format!(
        "{{ search(table: {}, search: {}, bundles: {}, start: {}, limit: {}) {} }}",
        string_literal(OBJECTS_TABLE),
        string_literal(&request.search),
        bundle_list_literal(&request.bundles),
        request.start,
        request.limit,
        SEARCH_SELECTION,
    )
}
