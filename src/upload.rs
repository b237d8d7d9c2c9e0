use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

// ── Upload ───────────────────────────────────────────────────────────────────

/// An uploaded document: a seekable byte stream plus the metadata supplied by
/// the upload transport.
///
/// The stream stays caller-owned; validation rewinds it to the start before
/// each pass that reads content, so the same upload can be validated more
/// than once.
///
/// # Creating an upload
///
/// ```no_run
/// use printpreflight::Upload;
/// use std::io::Cursor;
///
/// // From a file on disk
/// let a = Upload::from_path("flyer.pdf").unwrap();
///
/// // From an in-memory buffer, as handed over by a web framework
/// let bytes: Vec<u8> = std::fs::read("flyer.pdf").unwrap();
/// let b = Upload::from_bytes("flyer.pdf", "application/pdf", bytes);
/// ```
pub struct Upload<R> {
    name: String,
    size: u64,
    content_type: String,
    reader: R,
}

impl Upload<Cursor<Vec<u8>>> {
    /// Wrap an in-memory buffer. The declared size is the buffer length.
    pub fn from_bytes(name: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            reader: Cursor::new(data),
        }
    }
}

impl Upload<BufReader<File>> {
    /// Open a file from the file system. The size comes from file metadata
    /// and the media type is derived from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = media_type_for(&name);

        Ok(Self {
            name,
            size,
            content_type,
            reader: BufReader::new(file),
        })
    }
}

impl<R: Read + Seek> Upload<R> {
    /// Wrap an arbitrary seekable stream with explicit transport metadata.
    ///
    /// `size` is the transport-declared byte count; for multipart uploads it
    /// may be known before the body has been spooled anywhere seekable.
    pub fn new(name: &str, content_type: &str, size: u64, reader: R) -> Self {
        Self {
            name: name.to_string(),
            size,
            content_type: content_type.to_string(),
            reader,
        }
    }

    /// Snapshot the file metadata. Reads nothing from the stream.
    pub fn file_info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            size: self.size,
            content_type: self.content_type.clone(),
            extension: extension_of(&self.name),
        }
    }

    /// Rewind to the start and read the whole stream.
    ///
    /// Earlier validation stages may have partially consumed the stream, so
    /// every content-reading pass starts from offset 0.
    pub(crate) fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

// ── FileInfo ─────────────────────────────────────────────────────────────────

/// Metadata of an uploaded file, derived once per validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File name as supplied by the upload transport.
    pub name: String,

    /// Declared size in bytes.
    pub size: u64,

    /// Declared media type (e.g. `"application/pdf"`). Recorded verbatim;
    /// format checks go by the extension.
    pub content_type: String,

    /// Lowercased extension including the leading dot (e.g. `".pdf"`), or
    /// an empty string when the name has none.
    pub extension: String,
}

/// Lowercased extension with leading dot, `""` when absent.
fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Best-effort media type for a file name, used by [`Upload::from_path`]
/// where no transport supplies one.
fn media_type_for(name: &str) -> String {
    match extension_of(name).as_str() {
        ".pdf" => "application/pdf",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        _ => "application/octet-stream",
    }
    .to_string()
}
