use lazy_static::lazy_static;
use regex::Regex;

// nginx `ui_short` log format:
// $remote_addr  $remote_user $http_x_real_ip [$time_local] "$request"
// $status $body_bytes_sent "$http_referer" "$http_user_agent" "$http_x_forwarded_for"
// "$http_X_REQUEST_ID" "$http_X_RB_USER" $request_time
lazy_static! {
    static ref LOG_LINE_PATTERN: Regex = Regex::new(concat!(
        r"(?i)^(?P<remote_host>[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}) +",
        r"(?P<remote_user>[^ ]+) +",
        r"(?P<http_x_real_ip>[^ ]+) +",
        r"(?P<time_local>\[[^\]]+\]) +",
        r#""[a-z]+ (?P<request>[^"]+) HTTP[^"]+" +"#,
        r"(?P<status>[0-9]+) +",
        r"(?P<body_bytes_sent>[0-9]+) +",
        r#""(?P<http_referer>[^"]+)" +"#,
        r#""(?P<http_user_agent>[^"]+)" +"#,
        r#""(?P<http_x_forwarded_for>[^"]+)" +"#,
        r#""(?P<http_x_request_id>[^"]+)" +"#,
        r#""(?P<http_x_rb_user>[^"]+)" +"#,
        r"(?P<request_time>[0-9]+\.[0-9]+)$",
    ))
    .unwrap();
}

/// A successfully matched access log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedEntry<'a> {
    /// Request target exactly as logged (path plus query string).
    pub endpoint: &'a str,
    /// `$request_time` in seconds.
    pub duration: f64,
}

/// The line does not follow the access log grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch;

pub struct LogLineParser;

impl LogLineParser {
    /// Match a single line (without its line terminator) against the log grammar
    pub fn parse(line: &str) -> Result<ParsedEntry<'_>, NoMatch> {
        let captures = LOG_LINE_PATTERN.captures(line).ok_or(NoMatch)?;

        let endpoint = captures.name("request").ok_or(NoMatch)?.as_str();
        let duration = captures
            .name("request_time")
            .ok_or(NoMatch)?
            .as_str()
            .parse::<f64>()
            .map_err(|_| NoMatch)?;

        Ok(ParsedEntry { endpoint, duration })
    }
}
