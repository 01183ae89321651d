//! Host platform bridge
//!
//! The generator side of this workspace is pure file emission; this
//! crate covers the pieces that need services only the host platform
//! can provide: resolving `content://` URIs to local paths, looking up
//! well-known folders, and one-shot blocking HTTP. All of it goes
//! through the [`PlatformBridge`] trait so the shims stay testable off
//! device, and every lookup is `Option`-based: an unavailable service
//! means "no answer", never an error.

pub mod content;
pub mod http;
pub mod locations;
pub mod uri;

use std::io::{Read, Write};
use std::path::PathBuf;

pub use content::{ContentUriOutputStream, ContentUriResolver};
pub use http::{HttpRequest, HttpResponse, HttpStream};
pub use locations::SpecialDirectory;
pub use uri::ContentUri;

/// The raw response a bridge hands back for one HTTP exchange: the
/// status code, the response header block as unparsed text, and the
/// body as a plain blocking reader. Dropping the body releases the
/// underlying connection without further acknowledgement.
pub struct RawHttpResponse {
    pub status_code: i32,
    pub header_text: String,
    pub body: Box<dyn Read + Send>,
}

/// Services supplied by the host platform. Each method may answer
/// `None` when the service is unavailable; callers treat that as an
/// empty result.
pub trait PlatformBridge {
    /// Query a single string column of the row a content URI points
    /// at, with an optional selection clause and its arguments.
    fn query_string_column(
        &self,
        uri: &ContentUri,
        column: &str,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> Option<String>;

    /// Open a writable stream on a content URI.
    fn open_output_stream(&self, uri: &ContentUri) -> Option<Box<dyn Write + Send>>;

    /// Well-known folder lookup.
    fn special_directory(&self, kind: SpecialDirectory) -> Option<PathBuf>;

    /// Mount point of the primary shared storage.
    fn external_storage_root(&self) -> Option<PathBuf>;

    /// Mount points of any secondary storage devices, may be empty.
    fn secondary_storage_roots(&self) -> Vec<PathBuf>;

    /// Issue one blocking HTTP request.
    fn create_http_stream(&self, request: &HttpRequest) -> Option<RawHttpResponse>;
}
