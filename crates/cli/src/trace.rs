//! Trace file parsing.
//!
//! A trace is a plain-text file with one request per line:
//!
//! ```text
//! # comment
//! load 0x40
//! store 0x44 7
//! ```
//!
//! Addresses and values accept decimal or `0x`-prefixed hexadecimal. Blank
//! lines and `#` comments are skipped.

use cachesim_core::common::Word;

/// One request from the trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Read the word at an address.
    Load {
        /// Word-aligned byte address.
        addr: u64,
    },
    /// Write a word to an address.
    Store {
        /// Word-aligned byte address.
        addr: u64,
        /// The word to store.
        data: Word,
    },
}

/// Parses a whole trace file, reporting the first malformed line.
pub fn parse(contents: &str) -> Result<Vec<Request>, String> {
    let mut requests = Vec::new();
    for (lineno, line) in contents.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(req)) => requests.push(req),
            Ok(None) => {}
            Err(msg) => return Err(format!("line {}: {}", lineno + 1, msg)),
        }
    }
    Ok(requests)
}

/// Parses a single trace line; `None` for blank lines and comments.
fn parse_line(line: &str) -> Result<Option<Request>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let op = fields.next().unwrap_or_default();
    match op {
        "load" | "l" => {
            let addr = number(fields.next().ok_or("load needs an address")?)?;
            if fields.next().is_some() {
                return Err("trailing fields after load".into());
            }
            Ok(Some(Request::Load { addr }))
        }
        "store" | "s" => {
            let addr = number(fields.next().ok_or("store needs an address")?)?;
            let data = number(fields.next().ok_or("store needs a value")?)?;
            let data =
                Word::try_from(data).map_err(|_| format!("value {data:#x} wider than a word"))?;
            if fields.next().is_some() {
                return Err("trailing fields after store".into());
            }
            Ok(Some(Request::Store { addr, data }))
        }
        other => Err(format!("unknown operation `{other}`")),
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal number.
fn number(field: &str) -> Result<u64, String> {
    let parsed = if let Some(hex) = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        field.parse()
    };
    parsed.map_err(|_| format!("invalid number `{field}`"))
}
