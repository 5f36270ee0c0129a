use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

// --- Constants ---
const MAX_PORT_DIGITS: usize = 5;

/// Errors raised while turning the raw endpoint string into configurations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed arguments - {0}")]
    Malformed(String),
    #[error("must not specify two exporters with the same host - {0}")]
    DuplicateBinding(String),
    #[error("port out of range: {0}")]
    InvalidPort(u32),
}

/// Bind endpoint for one metrics listener: unbracketed host plus port.
///
/// Construction is the only place the numeric port range is enforced; the
/// endpoint string scanner accepts any run of up to five digits and leaves
/// range checking to this type. Hostnames stay textual here; DNS resolution
/// happens when the listener binds, not while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    pub host: String,
    pub port: u16,
}

impl BindAddress {
    pub fn new(host: &str, port: u32) -> Result<Self, ConfigError> {
        let port = u16::try_from(port).map_err(|_| ConfigError::InvalidPort(port))?;
        let host = host
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(host)
            .to_string();
        Ok(Self { host, port })
    }
}

impl fmt::Display for BindAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// One resolved `[host:]port:path` segment of the endpoint string.
///
/// `host` keeps the textual form given by the operator (brackets included for
/// IPv6 literals); `address` is the derived bind endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    pub source_file: PathBuf,
    pub address: BindAddress,
}

// One grammar match, before host defaulting.
struct Segment<'a> {
    host: Option<&'a str>,
    port: u32,
    path: &'a str,
    end: usize,
}

/// Parse the raw endpoint string into an ordered list of endpoint
/// configurations.
///
/// The string is a sequence of `[host:]port:path` segments. The scanner finds
/// successive non-overlapping matches left to right, skipping characters that
/// start no segment, so segments need no explicit separator beyond what the
/// grammar delimits (in practice `|`, the only character a path cannot
/// contain). A segment without a host uses `default_host`.
pub fn parse_endpoint_configs(
    args: &str,
    default_host: &str,
) -> Result<Vec<EndpointConfig>, ConfigError> {
    let bytes = args.as_bytes();
    let mut endpoints = Vec::new();

    let mut pos = 0;
    while pos < bytes.len() {
        match scan_segment(args, pos) {
            Some(segment) => {
                let host = segment.host.unwrap_or(default_host);
                let address = BindAddress::new(host, segment.port)?;
                endpoints.push(EndpointConfig {
                    host: host.to_string(),
                    port: address.port,
                    source_file: PathBuf::from(segment.path),
                    address,
                });
                pos = segment.end;
            }
            None => pos += 1,
        }
    }

    if endpoints.is_empty() {
        return Err(ConfigError::Malformed(args.to_string()));
    }

    let mut seen = HashSet::new();
    for endpoint in &endpoints {
        if !seen.insert(endpoint.host.as_str()) {
            return Err(ConfigError::DuplicateBinding(args.to_string()));
        }
    }

    Ok(endpoints)
}

// Try to match one segment starting exactly at `start`. The host-present
// interpretation is preferred; host-absent is the fallback at the same
// position, so `9404:/x` reads as a port while `h:9404:/x` reads as a host.
fn scan_segment(args: &str, start: usize) -> Option<Segment<'_>> {
    scan_with_host(args, start).or_else(|| scan_hostless(args, start))
}

fn scan_with_host(args: &str, start: usize) -> Option<Segment<'_>> {
    let bytes = args.as_bytes();

    if bytes[start] == b'[' {
        // Bracketed IPv6 literal. The inner part is at least one character
        // and extends to the last closing bracket that still leaves a valid
        // `:port:path` remainder.
        for close in (start + 2..bytes.len()).rev() {
            if bytes[close] != b']' {
                continue;
            }
            if bytes.get(close + 1) != Some(&b':') {
                continue;
            }
            if let Some((port, path, end)) = scan_port_path(args, close + 2) {
                return Some(Segment {
                    host: Some(&args[start..=close]),
                    port,
                    path,
                    end,
                });
            }
        }
        return None;
    }

    // Hostname or IPv4: a maximal run of word characters and dots, which must
    // be followed by a colon and a parsable port.
    let mut host_end = start;
    while host_end < bytes.len() && is_host_byte(bytes[host_end]) {
        host_end += 1;
    }
    if host_end == start || bytes.get(host_end) != Some(&b':') {
        return None;
    }
    let (port, path, end) = scan_port_path(args, host_end + 1)?;
    Some(Segment {
        host: Some(&args[start..host_end]),
        port,
        path,
        end,
    })
}

fn scan_hostless(args: &str, start: usize) -> Option<Segment<'_>> {
    let (port, path, end) = scan_port_path(args, start)?;
    Some(Segment {
        host: None,
        port,
        path,
        end,
    })
}

// Match `port:path` at `pos`: one to five decimal digits, a colon, then a
// non-empty run of anything but `|`. A longer digit run is not a valid port
// at this position (the scan may still pick up a five-digit suffix of it at
// a later position).
fn scan_port_path(args: &str, pos: usize) -> Option<(u32, &str, usize)> {
    let bytes = args.as_bytes();

    let mut digits_end = pos;
    while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
        digits_end += 1;
    }
    let digits = digits_end - pos;
    if digits == 0 || digits > MAX_PORT_DIGITS {
        return None;
    }
    if bytes.get(digits_end) != Some(&b':') {
        return None;
    }

    let path_start = digits_end + 1;
    let mut path_end = path_start;
    while path_end < bytes.len() && bytes[path_end] != b'|' {
        path_end += 1;
    }
    if path_end == path_start {
        return None;
    }

    // At most five digits, always fits.
    let port: u32 = args[pos..digits_end].parse().ok()?;
    Some((port, &args[path_start..path_end], path_end))
}

fn is_host_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}
