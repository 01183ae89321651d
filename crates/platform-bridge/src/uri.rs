//! `content://` URI parsing.

/// A parsed content URI: scheme, authority, and the percent-decoded
/// path below the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUri {
    scheme: String,
    authority: String,
    path: String,
}

impl ContentUri {
    /// Parse a URI string. Returns `None` when there is no
    /// `scheme://authority` prefix.
    pub fn parse(uri: &str) -> Option<Self> {
        let (scheme, rest) = uri.split_once("://")?;
        if scheme.is_empty() {
            return None;
        }
        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, path),
            None => (rest, ""),
        };
        Some(Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: percent_decode(path),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Decoded path below the authority, without the leading slash.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The document id: everything in the path after its first slash.
    /// `content://x.documents/document/primary:Music` -> `primary:Music`.
    pub fn document_id(&self) -> &str {
        match self.path.split_once('/') {
            Some((_, id)) => id,
            None => "",
        }
    }

    /// The document id split on `:`, the field separator the documents
    /// providers use.
    pub fn document_fields(&self) -> Vec<&str> {
        let id = self.document_id();
        if id.is_empty() {
            Vec::new()
        } else {
            id.split(':').collect()
        }
    }

    pub fn to_uri_string(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.authority, self.path)
    }
}

/// Decode `%xx` escapes, leaving malformed escapes as they are.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(value) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
