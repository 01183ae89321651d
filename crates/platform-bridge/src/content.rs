//! Content-URI resolution.
//!
//! Maps `content://` URIs handed out by the documents and media
//! providers back to local filesystem paths, where such a path exists.
//! The documents providers are dispatched on authority; anything else
//! falls back to the provider's `_data` column. A URI with no local
//! path resolves to `None`.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::locations::SpecialDirectory;
use crate::uri::ContentUri;
use crate::PlatformBridge;

const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";
const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
const MEDIA_AUTHORITY: &str = "com.android.providers.media.documents";

/// Resolves content URIs against one [`PlatformBridge`].
pub struct ContentUriResolver<'a> {
    bridge: &'a dyn PlatformBridge,
}

impl<'a> ContentUriResolver<'a> {
    pub fn new(bridge: &'a dyn PlatformBridge) -> Self {
        Self { bridge }
    }

    /// The local filesystem path behind a content URI, when one
    /// exists.
    pub fn local_path(&self, uri: &ContentUri) -> Option<PathBuf> {
        let fields = uri.document_fields();

        if uri.authority() == EXTERNAL_STORAGE_AUTHORITY {
            let storage_id = fields.first()?;
            let subpath = fields.get(1).copied().unwrap_or("");
            return Some(self.storage_device_path(storage_id)?.join(subpath));
        }

        if uri.authority() == DOWNLOADS_AUTHORITY {
            let kind = *fields.first()?;
            let download_id = fields.get(1).copied().unwrap_or("");

            // Tree ids carry path segments after the kind.
            let kind_root = kind.split('/').next().unwrap_or(kind);

            if kind_root.eq_ignore_ascii_case("raw") {
                return Some(PathBuf::from(download_id));
            }
            if kind_root.eq_ignore_ascii_case("downloads") {
                let subpath = uri
                    .path()
                    .split_once("tree/downloads")
                    .map(|(_, rest)| rest.trim_start_matches('/'))
                    .unwrap_or("");
                return Some(
                    self.bridge
                        .special_directory(SpecialDirectory::Downloads)?
                        .join(subpath),
                );
            }

            // Numeric ids live in the public downloads table.
            let public = ContentUri::parse(&format!(
                "content://downloads/public_downloads/{}",
                uri.document_id()
            ))?;
            return self.local_path(&public);
        }

        if uri.authority() == MEDIA_AUTHORITY && !uri.document_id().is_empty() {
            let kind = *fields.first()?;
            let media_id = fields.get(1).copied().unwrap_or("");
            let kind = if kind == "image" { "images" } else { kind };

            let media = ContentUri::parse(&format!("content://media/external/{kind}/media"))?;
            return self.data_column(&media, Some("_id=?"), &[media_id]);
        }

        self.data_column(uri, None, &[])
    }

    /// Display name of the document a URI points at, falling back to
    /// the basename of its `_data` path.
    pub fn display_name(&self, uri: &ContentUri) -> Option<String> {
        if let Some(name) = self
            .bridge
            .query_string_column(uri, "_display_name", None, &[])
            .filter(|n| !n.is_empty())
        {
            return Some(name);
        }

        let path = self.bridge.query_string_column(uri, "_data", None, &[])?;
        path.rsplit('/').next().map(str::to_string).filter(|n| !n.is_empty())
    }

    fn data_column(
        &self,
        uri: &ContentUri,
        selection: Option<&str>,
        args: &[&str],
    ) -> Option<PathBuf> {
        let value = self.bridge.query_string_column(uri, "_data", selection, args)?;
        if value.is_empty() {
            debug!("no _data column for {}", uri.to_uri_string());
            return None;
        }
        Some(PathBuf::from(value))
    }

    fn storage_device_path(&self, storage_id: &str) -> Option<PathBuf> {
        if storage_id == "primary" {
            return self.bridge.external_storage_root();
        }

        // Secondary devices are identified by their mount point name.
        self.bridge
            .secondary_storage_roots()
            .into_iter()
            .find(|root| root.file_name().is_some_and(|name| name == storage_id))
    }
}

/// A byte-position-tracking writer over a bridge output stream.
pub struct ContentUriOutputStream {
    inner: Box<dyn Write + Send>,
    position: u64,
}

impl ContentUriOutputStream {
    /// Open the URI for writing through the bridge. `None` when the
    /// provider refuses a stream.
    pub fn open(bridge: &dyn PlatformBridge, uri: &ContentUri) -> Option<Self> {
        Some(Self {
            inner: bridge.open_output_stream(uri)?,
            position: 0,
        })
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl Write for ContentUriOutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.position += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::HttpRequest;
    use crate::RawHttpResponse;
    use std::collections::HashMap;
    use std::path::Path;

    /// Test double answering from fixed tables.
    #[derive(Default)]
    pub(crate) struct MockBridge {
        /// (uri string, column, selection, args joined by '\x1f') -> value
        pub columns: HashMap<(String, String, String, String), String>,
        pub app_data: Option<PathBuf>,
        pub downloads: Option<PathBuf>,
        pub external_root: Option<PathBuf>,
        pub secondary_roots: Vec<PathBuf>,
    }

    impl MockBridge {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_app_data(mut self, path: &Path) -> Self {
            self.app_data = Some(path.to_path_buf());
            self
        }

        pub fn with_column(
            mut self,
            uri: &str,
            column: &str,
            selection: &str,
            args: &[&str],
            value: &str,
        ) -> Self {
            self.columns.insert(
                (uri.into(), column.into(), selection.into(), args.join("\x1f")),
                value.into(),
            );
            self
        }
    }

    impl PlatformBridge for MockBridge {
        fn query_string_column(
            &self,
            uri: &ContentUri,
            column: &str,
            selection: Option<&str>,
            selection_args: &[&str],
        ) -> Option<String> {
            self.columns
                .get(&(
                    uri.to_uri_string(),
                    column.to_string(),
                    selection.unwrap_or("").to_string(),
                    selection_args.join("\x1f"),
                ))
                .cloned()
        }

        fn open_output_stream(&self, _uri: &ContentUri) -> Option<Box<dyn Write + Send>> {
            Some(Box::new(Vec::new()))
        }

        fn special_directory(&self, kind: SpecialDirectory) -> Option<PathBuf> {
            match kind {
                SpecialDirectory::AppData => self.app_data.clone(),
                SpecialDirectory::Downloads => self.downloads.clone(),
                _ => None,
            }
        }

        fn external_storage_root(&self) -> Option<PathBuf> {
            self.external_root.clone()
        }

        fn secondary_storage_roots(&self) -> Vec<PathBuf> {
            self.secondary_roots.clone()
        }

        fn create_http_stream(&self, _request: &HttpRequest) -> Option<RawHttpResponse> {
            None
        }
    }

    fn uri(s: &str) -> ContentUri {
        ContentUri::parse(s).unwrap()
    }

    #[test]
    fn primary_storage_document_resolves_under_the_storage_root() {
        let mut bridge = MockBridge::new();
        bridge.external_root = Some(PathBuf::from("/storage/emulated/0"));

        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.externalstorage.documents/document/primary:Music/song.wav",
            ))
            .unwrap();
        assert_eq!(path, PathBuf::from("/storage/emulated/0/Music/song.wav"));
    }

    #[test]
    fn secondary_storage_is_matched_by_mount_point_name() {
        let mut bridge = MockBridge::new();
        bridge.secondary_roots = vec![PathBuf::from("/storage/1D04-2A08")];

        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.externalstorage.documents/document/1D04-2A08:clip.mp4",
            ))
            .unwrap();
        assert_eq!(path, PathBuf::from("/storage/1D04-2A08/clip.mp4"));
    }

    #[test]
    fn raw_download_id_is_a_direct_path() {
        let bridge = MockBridge::new();
        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.providers.downloads.documents/document/raw:/storage/emulated/0/Download/a.pdf",
            ))
            .unwrap();
        assert_eq!(path, PathBuf::from("/storage/emulated/0/Download/a.pdf"));
    }

    #[test]
    fn downloads_tree_resolves_under_the_download_folder() {
        let mut bridge = MockBridge::new();
        bridge.downloads = Some(PathBuf::from("/storage/emulated/0/Download"));

        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.providers.downloads.documents/tree/downloads/sub/b.zip",
            ));
        assert_eq!(path, Some(PathBuf::from("/storage/emulated/0/Download/sub/b.zip")));
    }

    #[test]
    fn numeric_download_id_goes_through_the_public_downloads_table() {
        let bridge = MockBridge::new().with_column(
            "content://downloads/public_downloads/msf:812",
            "_data",
            "",
            &[],
            "/storage/emulated/0/Download/c.txt",
        );

        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.providers.downloads.documents/document/msf:812",
            ))
            .unwrap();
        assert_eq!(path, PathBuf::from("/storage/emulated/0/Download/c.txt"));
    }

    #[test]
    fn media_image_documents_query_the_images_table_by_id() {
        let bridge = MockBridge::new().with_column(
            "content://media/external/images/media",
            "_data",
            "_id=?",
            &["42"],
            "/storage/emulated/0/DCIM/img.jpg",
        );

        let resolver = ContentUriResolver::new(&bridge);
        let path = resolver
            .local_path(&uri(
                "content://com.android.providers.media.documents/document/image:42",
            ))
            .unwrap();
        assert_eq!(path, PathBuf::from("/storage/emulated/0/DCIM/img.jpg"));
    }

    #[test]
    fn unknown_authority_without_a_data_column_is_none() {
        let bridge = MockBridge::new();
        let resolver = ContentUriResolver::new(&bridge);
        assert!(resolver
            .local_path(&uri("content://com.example.provider/document/whatever"))
            .is_none());
    }

    #[test]
    fn unknown_authority_with_a_data_column_resolves() {
        let bridge = MockBridge::new().with_column(
            "content://com.example.provider/item/7",
            "_data",
            "",
            &[],
            "/data/local/item7",
        );
        let resolver = ContentUriResolver::new(&bridge);
        assert_eq!(
            resolver.local_path(&uri("content://com.example.provider/item/7")),
            Some(PathBuf::from("/data/local/item7"))
        );
    }

    #[test]
    fn display_name_falls_back_to_the_data_basename() {
        let bridge = MockBridge::new().with_column(
            "content://com.example.provider/item/7",
            "_data",
            "",
            &[],
            "/data/local/item7.bin",
        );
        let resolver = ContentUriResolver::new(&bridge);
        assert_eq!(
            resolver.display_name(&uri("content://com.example.provider/item/7")),
            Some("item7.bin".to_string())
        );
    }

    #[test]
    fn output_stream_tracks_its_position() {
        let bridge = MockBridge::new();
        let mut stream =
            ContentUriOutputStream::open(&bridge, &uri("content://com.example.provider/item/7"))
                .unwrap();
        stream.write_all(b"hello").unwrap();
        stream.write_all(b" world").unwrap();
        assert_eq!(stream.position(), 11);
    }
}
