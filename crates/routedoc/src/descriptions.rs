//! Default response descriptions keyed by status code.

/// Description used when neither the code nor its class is known
pub const DEFAULT_FALLBACK_DESCRIPTION: &str = "Response";

/// Reason phrase for an exact status code or a status class (`"4XX"`)
pub fn lookup(code: &str) -> Option<&'static str> {
    let description = match code {
        "100" => "Continue",
        "101" => "Switching Protocols",
        "102" => "Processing",
        "103" => "Early Hints",
        "200" => "OK",
        "201" => "Created",
        "202" => "Accepted",
        "203" => "Non-Authoritative Information",
        "204" => "No Content",
        "205" => "Reset Content",
        "206" => "Partial Content",
        "207" => "Multi-Status",
        "208" => "Already Reported",
        "226" => "IM Used",
        "300" => "Multiple Choices",
        "301" => "Moved Permanently",
        "302" => "Found",
        "303" => "See Other",
        "304" => "Not Modified",
        "305" => "Use Proxy",
        "307" => "Temporary Redirect",
        "308" => "Permanent Redirect",
        "400" => "Bad Request",
        "401" => "Unauthorized",
        "402" => "Payment Required",
        "403" => "Forbidden",
        "404" => "Not Found",
        "405" => "Method Not Allowed",
        "406" => "Not Acceptable",
        "407" => "Proxy Authentication Required",
        "408" => "Request Timeout",
        "409" => "Conflict",
        "410" => "Gone",
        "411" => "Length Required",
        "412" => "Precondition Failed",
        "413" => "Content Too Large",
        "414" => "URI Too Long",
        "415" => "Unsupported Media Type",
        "416" => "Range Not Satisfiable",
        "417" => "Expectation Failed",
        "418" => "I'm a teapot",
        "421" => "Misdirected Request",
        "422" => "Unprocessable Content",
        "423" => "Locked",
        "424" => "Failed Dependency",
        "425" => "Too Early",
        "426" => "Upgrade Required",
        "428" => "Precondition Required",
        "429" => "Too Many Requests",
        "431" => "Request Header Fields Too Large",
        "451" => "Unavailable For Legal Reasons",
        "500" => "Internal Server Error",
        "501" => "Not Implemented",
        "502" => "Bad Gateway",
        "503" => "Service Unavailable",
        "504" => "Gateway Timeout",
        "505" => "HTTP Version Not Supported",
        "506" => "Variant Also Negotiates",
        "507" => "Insufficient Storage",
        "508" => "Loop Detected",
        "510" => "Not Extended",
        "511" => "Network Authentication Required",
        "1XX" => "Informational",
        "2XX" => "Success",
        "3XX" => "Redirection",
        "4XX" => "Client Error",
        "5XX" => "Server Error",
        _ => return None,
    };
    Some(description)
}

/// Class key for a status code, e.g. `"4XX"` for `"499"`
fn class_of(code: &str) -> Option<String> {
    code.chars().next().map(|first| format!("{}XX", first))
}

/// Description for a response that was documented without one.
///
/// Tries the exact code, then its class, then `fallback`.
pub fn default_response_description(code: &str, fallback: &str) -> String {
    lookup(code)
        .or_else(|| class_of(code).and_then(|class| lookup(&class)))
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_code() {
        assert_eq!(default_response_description("200", "x"), "OK");
        assert_eq!(default_response_description("404", "x"), "Not Found");
    }

    #[test]
    fn test_class_fallback() {
        assert_eq!(default_response_description("499", "x"), "Client Error");
        assert_eq!(default_response_description("299", "x"), "Success");
        assert_eq!(default_response_description("4XX", "x"), "Client Error");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(default_response_description("799", "Whatever"), "Whatever");
        assert_eq!(default_response_description("default", "Whatever"), "Whatever");
        assert_eq!(default_response_description("", "Whatever"), "Whatever");
    }
}
